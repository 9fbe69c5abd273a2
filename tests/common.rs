#![allow(dead_code)]

use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::json;

/// In-process stand-in for the BIN metadata provider.
///
/// - `400000` → 200 `{"scheme": "visa", "type": "debit"}`
/// - `500000` → 500
/// - `700000` → 200 with a non-JSON body
/// - anything else → 404
///
/// Requests without `Accept-Version: 3` get a 400.
pub struct StubProvider {
    pub base_url: String,
    hits: web::Data<AtomicUsize>,
    handle: ServerHandle,
}

impl StubProvider {
    pub async fn start() -> Self {
        let hits = web::Data::new(AtomicUsize::new(0));
        let app_hits = hits.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_hits.clone())
                .route("/{bin}", web::get().to(stub_lookup))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub provider");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            hits,
            handle,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn stub_lookup(
    req: HttpRequest,
    path: web::Path<String>,
    hits: web::Data<AtomicUsize>,
) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);

    let version = req
        .headers()
        .get("Accept-Version")
        .and_then(|value| value.to_str().ok());
    if version != Some("3") {
        return HttpResponse::BadRequest().json(json!({ "message": "Accept-Version: 3 required" }));
    }

    match path.as_str() {
        "400000" => HttpResponse::Ok().json(json!({ "scheme": "visa", "type": "debit" })),
        "500000" => HttpResponse::InternalServerError().finish(),
        "700000" => HttpResponse::Ok().content_type("text/plain").body("not json"),
        _ => HttpResponse::NotFound().finish(),
    }
}

/// Base URL of a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// Write a PDF with one page per entry of `pages`, each showing that text.
pub fn write_text_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => count,
        "Kids" => kids,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save test pdf");
}
