//! Post handlers - insert and retrieval.

use actix_web::{HttpResponse, web};

use postboard_core::domain::Post;
use postboard_core::service::PostFilter;
use postboard_shared::Ack;
use postboard_shared::dto::{InsertPostRequest, OrderQuery, PostQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
///
/// Body: `{"post_name": "...", "date": "DD.MM.YY", "author": "..."}`.
pub async fn insert_post(
    state: web::Data<AppState>,
    body: web::Json<InsertPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.post_name.is_empty() {
        return Err(AppError::BadRequest("post_name must not be empty".to_string()));
    }
    if req.author.is_empty() {
        return Err(AppError::BadRequest("author must not be empty".to_string()));
    }
    let date = Post::parse_date(&req.date)
        .map_err(|e| AppError::BadRequest(format!("invalid date {:?}: {}", req.date, e)))?;

    let post = Post::new(req.post_name, req.author, date);
    state.posts.insert(&post).await?;

    Ok(HttpResponse::Created().json(Ack::new("Information stored successfully")))
}

/// GET /api/posts?post_name=&author=&order=
///
/// Returns a JSON array of posts; both filters absent yields an empty
/// array without touching the store.
pub async fn get_posts(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let filter = PostFilter {
        name: non_empty(q.post_name),
        author: non_empty(q.author),
        order_by_date: q.order.unwrap_or(false),
    };

    let posts = state.posts.query(&filter).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/author/{author}?order=
pub async fn get_posts_by_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<OrderQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter {
        name: None,
        author: Some(path.into_inner()),
        order_by_date: query.order.unwrap_or(false),
    };

    let posts = state.posts.query(&filter).await?;
    Ok(HttpResponse::Ok().json(posts))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
