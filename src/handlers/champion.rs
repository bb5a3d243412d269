//! Champion controller: method + optional id to a repository call, shaped into a response.

use crate::error::AppError;
use crate::extractors::{PageParams, RequestFields};
use crate::model::{ChampionInput, NewChampion, UpdateMode};
use crate::response::{json_response, paginate, with_links};
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Request},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

pub struct ChampionController<'a> {
    state: &'a AppState,
}

fn require_id(id: Option<i64>) -> Result<i64, AppError> {
    id.ok_or_else(|| AppError::BadRequest("Missing ID".into()))
}

fn not_found() -> AppError {
    AppError::NotFound("Champion not found".into())
}

async fn read_input(req: Request) -> Result<ChampionInput, AppError> {
    let RequestFields(fields) = RequestFields::from_request(req, &()).await?;
    ChampionInput::try_from(&fields)
}

impl<'a> ChampionController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        ChampionController { state }
    }

    pub async fn handle(&self, id: Option<i64>, req: Request) -> Result<Response, AppError> {
        let method = req.method().clone();
        match method {
            Method::GET => match id {
                Some(id) => self.read(id).await,
                None => self.list(PageParams::from_uri(req.uri())?).await,
            },
            Method::POST => self.create(req).await,
            Method::PUT => self.update(require_id(id)?, req, UpdateMode::Full).await,
            Method::PATCH => self.update(require_id(id)?, req, UpdateMode::Partial).await,
            Method::DELETE => self.delete(require_id(id)?).await,
            _ => Err(AppError::MethodNotAllowed),
        }
    }

    async fn list(&self, page: PageParams) -> Result<Response, AppError> {
        let list = self.state.champions.list(page.offset, page.limit).await?;
        let body = paginate(list, page.offset, page.limit, &self.state.links);
        Ok(json_response(StatusCode::OK, &body))
    }

    async fn read(&self, id: i64) -> Result<Response, AppError> {
        let champion = self.state.champions.get(id).await?.ok_or_else(not_found)?;
        Ok(json_response(StatusCode::OK, &with_links(champion, &self.state.links)))
    }

    async fn create(&self, req: Request) -> Result<Response, AppError> {
        let new = NewChampion::from_input(read_input(req).await?)?;
        let champion = self.state.champions.create(new).await?;
        Ok(json_response(StatusCode::CREATED, &with_links(champion, &self.state.links)))
    }

    async fn update(&self, id: i64, req: Request, mode: UpdateMode) -> Result<Response, AppError> {
        let input = read_input(req).await?;
        let champion = self
            .state
            .champions
            .update(id, input, mode)
            .await?
            .ok_or_else(not_found)?;
        Ok(json_response(StatusCode::OK, &with_links(champion, &self.state.links)))
    }

    async fn delete(&self, id: i64) -> Result<Response, AppError> {
        self.state.champions.delete(id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
