//! One-shot flash messages carried across a redirect in a cookie.
//!
//! A redirect stores a message code in the `flash` cookie; the next page that
//! shows messages reads it into its `messages` list and clears the cookie.

use std::future::{Ready, ready};

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    NotPostAuthor,
    NotCommentAuthor,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::NotPostAuthor => "not-post-author",
            Flash::NotCommentAuthor => "not-comment-author",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not-post-author" => Some(Flash::NotPostAuthor),
            "not-comment-author" => Some(Flash::NotCommentAuthor),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::NotPostAuthor => "You can only change your own posts.",
            Flash::NotCommentAuthor => "You can only change your own comments.",
        }
    }

    fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.code())
            .path("/")
            .http_only(true)
            .finish()
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `303 See Other` to `location`, leaving `flash` for the next page.
pub fn redirect_with(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash.cookie())
        .finish()
}

fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Extractor for the flash message left by the previous response, if any.
#[derive(Debug, Default)]
pub struct IncomingFlash {
    present: bool,
    flash: Option<Flash>,
}

impl IncomingFlash {
    pub fn messages(&self) -> Vec<String> {
        self.flash
            .map(|flash| vec![flash.message().to_string()])
            .unwrap_or_default()
    }

    /// `200 OK` with `body`, clearing the consumed flash cookie.
    pub fn respond<T: Serialize>(&self, body: &T) -> HttpResponse {
        let mut response = HttpResponse::Ok();
        if self.present {
            response.cookie(removal());
        }
        response.json(body)
    }
}

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let incoming = match req.cookie(FLASH_COOKIE) {
            Some(cookie) => IncomingFlash {
                present: true,
                flash: Flash::from_code(cookie.value()),
            },
            None => IncomingFlash::default(),
        };

        ready(Ok(incoming))
    }
}
