//! HTML views - askama templates and the data they render.

use actix_web::{HttpResponse, http::StatusCode};
use askama::Template;
use thiserror::Error;
use url::form_urlencoded;

use blog_core::domain::Post;
use blog_core::{Page, PageWindow};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct TemplateRenderError(#[from] askama::Error);

/// Render `template` into an HTML response with `status`.
pub fn render_html<T: Template>(
    template: &T,
    status: StatusCode,
) -> Result<HttpResponse, TemplateRenderError> {
    let body = template.render()?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

pub struct PostRowView {
    pub href: String,
    pub title: String,
    pub created_at: String,
}

impl From<&Post> for PostRowView {
    fn from(post: &Post) -> Self {
        Self {
            href: post_href(&post.slug),
            title: post.title.clone(),
            created_at: post.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

pub struct PageLinkView {
    pub number: u64,
    pub href: String,
    pub current: bool,
}

pub struct PaginationView {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub links: Vec<PageLinkView>,
}

impl PaginationView {
    fn new(window: &PageWindow, keyword: &str) -> Self {
        Self {
            number: window.number,
            num_pages: window.num_pages,
            count: window.count,
            previous_href: window
                .previous_page_number()
                .map(|n| listing_href(keyword, n)),
            next_href: window.next_page_number().map(|n| listing_href(keyword, n)),
            links: (1..=window.num_pages)
                .map(|n| PageLinkView {
                    number: n,
                    href: listing_href(keyword, n),
                    current: n == window.number,
                })
                .collect(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub keyword: String,
    pub posts: Vec<PostRowView>,
    pub pagination: PaginationView,
}

impl IndexTemplate {
    pub fn new(page: &Page<Post>, keyword: Option<&str>) -> Self {
        let keyword = keyword.unwrap_or_default().to_string();
        Self {
            posts: page.items.iter().map(PostRowView::from).collect(),
            pagination: PaginationView::new(&page.window, &keyword),
            keyword,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub title: String,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
    pub edited: bool,
}

impl From<&Post> for DetailTemplate {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            text: post.text.clone(),
            created_at: post.created_at.format(DATE_FORMAT).to_string(),
            updated_at: post.updated_at.format(DATE_FORMAT).to_string(),
            edited: post.updated_at > post.created_at,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

/// `/?keyword=...&page=n`, omitting an empty keyword.
pub fn listing_href(keyword: &str, page: u64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !keyword.is_empty() {
        query.append_pair("keyword", keyword);
    }
    query.append_pair("page", &page.to_string());
    format!("/?{}", query.finish())
}

pub fn post_href(slug: &str) -> String {
    format!("/{slug}/")
}
