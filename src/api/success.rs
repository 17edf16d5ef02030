use actix_web::HttpResponse;
use std::borrow::Cow;

#[derive(serde::Serialize)]
pub struct MessageBody {
    pub message: Cow<'static, str>,
}

/// Either a bare JSON payload or a `{ "message": ... }` body.
pub enum SuccessBody<T: serde::Serialize> {
    Data(T),
    Message(Cow<'static, str>),
}

pub struct Success<T: serde::Serialize> {
    pub status: actix_web::http::StatusCode,
    pub body: SuccessBody<T>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::OK, body: SuccessBody::Data(data) }
    }

    pub fn created(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::CREATED, body: SuccessBody::Data(data) }
    }

    pub fn message<M>(msg: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self { status: actix_web::http::StatusCode::OK, body: SuccessBody::Message(msg.into()) }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);

        match self.body {
            SuccessBody::Data(data) => response.json(data),
            SuccessBody::Message(message) => response.json(MessageBody { message }),
        }
    }
}
