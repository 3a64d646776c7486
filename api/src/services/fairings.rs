use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{Request, Response};

/// Opens every response to cross-origin browser clients. Credentials travel
/// in the `Authorization` header, so it is listed alongside `Content-Type`.
pub struct Cors;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, GET, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Cross-origin headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        for (name, value) in CORS_HEADERS {
            response.set_header(Header::new(name, value));
        }
    }
}

/// Answers CORS preflight requests for every path.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}

pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request logger",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        tracing::info!(
            method = %request.method(),
            uri = %request.uri(),
            status = response.status().code,
            "request handled"
        );
    }
}
