use actix_web::{web, HttpResponse};
use log::info;

use crate::models::{ApiError, BuyRequest, PriceQuery, QuoteRequest, SaleParams};
use crate::services::SaleService;

// Create a new sale on the curve
pub async fn create_sale(
    sale_service: web::Data<SaleService>,
    params: web::Json<SaleParams>,
) -> Result<HttpResponse, ApiError> {
    info!("Creating new sale: {}", params.token_symbol);

    let sale = sale_service.create_sale(params.into_inner()).await?;
    Ok(HttpResponse::Created().json(sale))
}

pub async fn get_all_sales(
    sale_service: web::Data<SaleService>,
) -> Result<HttpResponse, ApiError> {
    let sales = sale_service.list_sales().await;
    info!("Retrieved {} sales", sales.len());
    Ok(HttpResponse::Ok().json(sales))
}

pub async fn get_sale(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let sale = sale_service.get_sale(&sale_id).await?;
    Ok(HttpResponse::Ok().json(sale))
}

// Spot price at ?sold=x, or at the current point when omitted
pub async fn get_price(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
    query: web::Query<PriceQuery>,
) -> Result<HttpResponse, ApiError> {
    let price = sale_service.price(&sale_id, query.sold).await?;
    Ok(HttpResponse::Ok().json(price))
}

pub async fn quote(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
    request: web::Json<QuoteRequest>,
) -> Result<HttpResponse, ApiError> {
    let quote = sale_service.quote(&sale_id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quote))
}

pub async fn buy(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
    request: web::Json<BuyRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Buy request on sale {}: {} tokens", sale_id, request.amount_tokens);

    let result = sale_service.buy(&sale_id, request.amount_tokens).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn get_migration_status(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let status = sale_service.migration_status(&sale_id).await?;
    Ok(HttpResponse::Ok().json(status))
}

pub async fn migrate(
    sale_service: web::Data<SaleService>,
    sale_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    info!("Migration request on sale {}", sale_id);

    let result = sale_service.migrate(&sale_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{test, App};
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};

    use crate::routes;
    use crate::services::{SaleService, SaleStore};
    use crate::utils::clock::SystemClock;

    fn sale_service() -> actix_web::web::Data<SaleService> {
        actix_web::web::Data::new(SaleService::new(
            Arc::new(SaleStore::in_memory()),
            Arc::new(SystemClock),
        ))
    }

    fn fennec() -> Value {
        json!({
            "token_symbol": "fennec",
            "sale_supply": 1000.0,
            "lp_supply": 250.0,
            "start_price": 1.0,
            "slope": 0.01
        })
    }

    #[actix_web::test]
    async fn test_full_sale_over_http() {
        let app = test::init_service(
            App::new().app_data(sale_service()).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/sales").set_json(fennec()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["sale"]["token_symbol"], "FENNEC");
        assert_eq!(created["sale"]["phase"], "active");

        for amount in [400.0, 600.0] {
            let req = test::TestRequest::post()
                .uri(&format!("/sales/{}/buy", id))
                .set_json(json!({ "amount_tokens": amount }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri(&format!("/sales/{}/migration", id)).to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["can_migrate"], true);

        let req = test::TestRequest::post().uri(&format!("/sales/{}/migrate", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let migrated: Value = test::read_body_json(resp).await;
        assert_eq!(migrated["lp"]["token_amount"], 250.0);
        assert_eq!(migrated["lp"]["reserve_amount"], 6000.0);
        assert_eq!(migrated["sale"]["reserve"], 0.0);
        assert_eq!(migrated["sale"]["phase"], "migrated");

        let req = test::TestRequest::post().uri(&format!("/sales/{}/migrate", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "STATE_ERROR");
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let app = test::init_service(
            App::new().app_data(sale_service()).configure(routes::configure),
        )
        .await;

        let mut bad = fennec();
        bad["slope"] = json!(-1.0);
        let req = test::TestRequest::post().uri("/sales").set_json(bad).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/sales/does-not-exist").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post().uri("/sales").set_json(fennec()).to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/sales/{}/buy", id))
            .set_json(json!({ "amount_tokens": 1000.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "CAPACITY_ERROR");

        let req = test::TestRequest::post().uri(&format!("/sales/{}/migrate", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_create_requires_slope() {
        let app = test::init_service(
            App::new().app_data(sale_service()).configure(routes::configure),
        )
        .await;

        let mut params = fennec();
        params.as_object_mut().unwrap().remove("slope");
        let req = test::TestRequest::post().uri("/sales").set_json(params).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let req = test::TestRequest::get().uri("/sales").to_request();
        let sales: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(sales.as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn test_quote_and_price() {
        let app = test::init_service(
            App::new().app_data(sale_service()).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/sales").set_json(fennec()).to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/sales/{}/quote", id))
            .set_json(json!({ "amount_tokens": 400.0 }))
            .to_request();
        let quote: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(quote["cost"], 1200.0);
        assert_eq!(quote["end_price"], 5.0);

        let req = test::TestRequest::get()
            .uri(&format!("/sales/{}/price?sold=500", id))
            .to_request();
        let price: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(price["price"], 6.0);

        // quoting never moves the curve
        let req = test::TestRequest::get().uri(&format!("/sales/{}", id)).to_request();
        let sale: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(sale["sale"]["sold"], 0.0);
    }
}
