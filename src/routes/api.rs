use crate::handlers;
use actix_web::{web, Scope};

pub fn config() -> Scope {
    web::scope("/api/v1")
        .route("/ping", web::get().to(handlers::ping))
        .route("/sources", web::get().to(handlers::list_sources))
        .route("/search", web::post().to(handlers::search))
        .route("/history", web::get().to(handlers::list_history))
        .route("/history/{search_id}", web::delete().to(handlers::delete_history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ImageItem, SearchHistoryEntry};
    use crate::repositories::HistoryStore;
    use crate::services::search_service::tests::{image, FixedSource, MemoryHistory};
    use crate::services::{CatalogService, SearchService, TtlCache};
    use crate::AppState;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Instant;

    fn state(images: Vec<ImageItem>, history: Arc<MemoryHistory>) -> AppState {
        let catalog = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        AppState {
            search_service: SearchService::new(Arc::new(FixedSource(images)), history.clone()),
            catalog_service: CatalogService::new(catalog, TtlCache::new(300)),
            history,
            config: Config::default(),
            start_time: Instant::now(),
        }
    }

    #[actix_rt::test]
    async fn ping_returns_ok() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Vec::new(), Default::default())))
                .service(config()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/ping").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[actix_rt::test]
    async fn blank_search_is_rejected() {
        let history = Arc::new(MemoryHistory::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(vec![image("x", &[])], history.clone())))
                .service(config()),
        )
        .await;

        for query in ["", "   "] {
            let req = test::TestRequest::post()
                .uri("/api/v1/search")
                .set_json(json!({ "query": query }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
        assert!(history.entries.lock().await.is_empty());
    }

    #[actix_rt::test]
    async fn search_then_history_round_trip() {
        let history = Arc::new(MemoryHistory::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(
                    vec![image("Red Nebula Cluster", &["nebula", "space"])],
                    history.clone(),
                )))
                .service(config()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/search")
            .set_json(json!({ "query": "red nebula" }))
            .to_request();
        let results: Vec<ImageItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].confidence.unwrap() > 0.0);

        let req = test::TestRequest::get()
            .uri("/api/v1/history?page=1&limit=10")
            .to_request();
        let entries: Vec<SearchHistoryEntry> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "red nebula");

        let uri = format!("/api/v1/history/{}", entries[0].id);
        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(history.list(0, 10).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn history_records_query_as_submitted() {
        let history = Arc::new(MemoryHistory::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(vec![image("mars", &[])], history.clone())))
                .service(config()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/search")
            .set_json(json!({ "query": "  mars " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let entries = history.list(0, 10).await.unwrap();
        assert_eq!(entries[0].query, "  mars ");
    }

    #[actix_rt::test]
    async fn huge_history_page_is_empty() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Vec::new(), Default::default())))
                .service(config()),
        )
        .await;

        let uri = format!("/api/v1/history?page={}&limit=100", usize::MAX / 2);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let entries: Vec<SearchHistoryEntry> = test::call_and_read_body_json(&app, req).await;
        assert!(entries.is_empty());
    }

    #[actix_rt::test]
    async fn history_pagination_is_validated() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Vec::new(), Default::default())))
                .service(config()),
        )
        .await;

        for uri in ["/api/v1/history?page=0", "/api/v1/history?limit=101"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/history/not-a-uuid")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn missing_catalog_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Vec::new(), Default::default())))
                .service(config()),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/v1/sources").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
