use std::path::Path;

use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::resolver;

/// Selects the response for a parsed request.
///
/// `GET` and `HEAD` serve files. `POST` is recognized but refused with 405.
/// Anything else earns a 501 naming the method. Every resolution failure,
/// whether the path is missing, a directory, a symlink or an escape
/// attempt, collapses into the same 404.
pub fn dispatch(request: &Request, docroot: &Path) -> Response {
    match request.method.as_str() {
        "GET" | "HEAD" => file_response(request, docroot),
        "POST" => Response::method_not_allowed(&request.method),
        _ => Response::not_implemented(&request.method),
    }
}

fn file_response(request: &Request, docroot: &Path) -> Response {
    match resolver::resolve(docroot, &request.path) {
        Some(file) => {
            let content_type = mime::guess_content_type(&file.path);
            Response::file(file.path, file.length, content_type)
        }
        None => Response::not_found(),
    }
}
