use actix_web::{get, HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    service: &'static str,
}

#[get("/")]
async fn analyze_root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: "Startup Lead Scout - Analyze Service",
        service: "analyze",
    })
}

#[get("/")]
async fn reach_root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: "Startup Lead Scout - Reach Service",
        service: "reach",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn analyze_root_identifies_the_service() {
        let app = test::init_service(App::new().service(analyze_root)).await;
        let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(response.status().is_success());
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["service"], "analyze");
    }

    #[actix_web::test]
    async fn reach_root_identifies_the_service() {
        let app = test::init_service(App::new().service(reach_root)).await;
        let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(response.status().is_success());
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["service"], "reach");
    }
}
