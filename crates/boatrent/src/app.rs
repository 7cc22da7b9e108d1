use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, patch, post},
    Router,
};
use boatrent_auth::auth_routes;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        boats::{
            check_boat_availability, create_boat, delete_boat, get_boat, list_boats,
            search_boats, update_boat,
        },
        bookings::{
            cancel_booking, create_booking, get_booking, list_booking_payments, list_bookings,
            update_booking_status,
        },
        health::{healthz, livez},
        notifications::{list_notifications, mark_notification_read},
        payments::{get_payment, process_payment},
        reservations::{confirm_reservation, create_reservation, delete_reservation},
        reviews::{create_review, list_reviews},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        // Boat routes
        .route("/boats", get(list_boats).post(create_boat))
        .route("/boats/search", get(search_boats))
        .route(
            "/boats/{id}",
            get(get_boat).put(update_boat).delete(delete_boat),
        )
        .route("/boats/{id}/availability", get(check_boat_availability))
        .route("/boats/{id}/reviews", get(list_reviews).post(create_review))
        // Booking routes
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/status", patch(update_booking_status))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/payments", get(list_booking_payments))
        // Reservation hold routes
        .route("/reservations", post(create_reservation))
        .route("/reservations/{id}", delete(delete_reservation))
        .route("/reservations/{id}/confirm", post(confirm_reservation))
        // Payment routes
        .route("/payments", post(process_payment))
        .route("/payments/{id}", get(get_payment))
        // Notification routes
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", patch(mark_notification_read))
        .merge(auth_routes().with_state(state.auth.clone()))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;

    use async_trait::async_trait;
    use boatrent_core::rental::{Booking, BookingStatus};
    use boatrent_core::storage::{BookingRepository, RepositoryError, Result as RepoResult};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use crate::config::Config;
    use crate::storage::InMemoryRepository;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Registers an account and returns its access token.
    async fn register(app: &Router, email: &str, role: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": email,
                "password": "contraseña-segura",
                "name": "Prueba",
                "role": role,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn publish_boat(app: &Router, token: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/boats",
            Some(token),
            Some(json!({
                "name": "La Tortuga",
                "boatType": "catamaran",
                "location": "Morrocoy",
                "capacity": 8,
                "pricePerDayCents": 50_000,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    fn days_ahead(days: i64) -> NaiveDate {
        Utc::now().date_naive() + chrono::Duration::days(days)
    }

    fn booking_body(boat_id: &str, start: i64, end: i64) -> Value {
        json!({
            "boatId": boat_id,
            "startDate": days_ahead(start),
            "endDate": days_ahead(end),
            "guests": 4,
        })
    }

    struct Fixture {
        app: Router,
        owner: String,
        customer: String,
        boat_id: String,
    }

    async fn fixture() -> Fixture {
        fixture_with(AppState::default()).await
    }

    async fn fixture_with(state: AppState) -> Fixture {
        let app = create_app(state);
        let owner = register(&app, "owner@example.com", "owner").await;
        let customer = register(&app, "customer@example.com", "customer").await;
        let boat_id = publish_boat(&app, &owner).await;
        Fixture {
            app,
            owner,
            customer,
            boat_id,
        }
    }

    async fn book(f: &Fixture, start: i64, end: i64) -> Value {
        let (status, body) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&f.customer),
            Some(booking_body(&f.boat_id, start, end)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_app(AppState::default());

        let (status, _) = send(&app, "GET", "/livez", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/healthz", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let app = create_app(AppState::default());
        register(&app, "dup@example.com", "customer").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "DUP@example.com",
                "password": "contraseña-segura",
                "name": "Otra",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "El correo electrónico ya está registrado");
    }

    #[tokio::test]
    async fn test_boat_routes_require_a_token() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            "POST",
            "/api/boats",
            None,
            Some(json!({ "name": "Sin token" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_customer_cannot_publish_boats() {
        let app = create_app(AppState::default());
        let customer = register(&app, "c@example.com", "customer").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/boats",
            Some(&customer),
            Some(json!({
                "name": "Pirata",
                "boatType": "yacht",
                "location": "Margarita",
                "capacity": 4,
                "pricePerDayCents": 10_000,
            })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"],
            "Solo los propietarios pueden publicar embarcaciones"
        );
    }

    #[tokio::test]
    async fn test_boat_crud_and_listing() {
        let f = fixture().await;

        let (status, boats) = send(&f.app, "GET", "/api/boats", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(boats.as_array().unwrap().len(), 1);

        let (status, boat) = send(
            &f.app,
            "PUT",
            &format!("/api/boats/{}", f.boat_id),
            Some(&f.owner),
            Some(json!({ "pricePerDayCents": 60_000 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{boat}");
        assert_eq!(boat["pricePerDayCents"], 60_000);

        let (status, _) = send(
            &f.app,
            "PUT",
            &format!("/api/boats/{}", f.boat_id),
            Some(&f.customer),
            Some(json!({ "pricePerDayCents": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &f.app,
            "DELETE",
            &format!("/api/boats/{}", f.boat_id),
            Some(&f.owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &f.app,
            "GET",
            &format!("/api/boats/{}", f.boat_id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Embarcación no encontrada");
    }

    #[tokio::test]
    async fn test_malformed_ids_and_bodies_are_bad_requests() {
        let f = fixture().await;

        let (status, _) = send(&f.app, "GET", "/api/boats/not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&f.customer),
            Some(json!({ "boatId": f.boat_id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Solicitud inválida"));
    }

    #[tokio::test]
    async fn test_overlapping_booking_is_a_conflict() {
        let f = fixture().await;
        book(&f, 10, 12).await;

        let (status, body) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&f.customer),
            Some(booking_body(&f.boat_id, 12, 14)),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "La embarcación no está disponible en las fechas seleccionadas"
        );

        // Adjacent range is free.
        book(&f, 13, 14).await;
    }

    #[tokio::test]
    async fn test_search_excludes_booked_boats() {
        let f = fixture().await;
        book(&f, 20, 22).await;

        let uri = format!(
            "/api/boats/search?location=morro&startDate={}&endDate={}",
            days_ahead(21),
            days_ahead(25)
        );
        let (status, found) = send(&f.app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(found.as_array().unwrap().is_empty());

        let uri = format!(
            "/api/boats/search?location=morro&startDate={}&endDate={}",
            days_ahead(23),
            days_ahead(25)
        );
        let (_, found) = send(&f.app, "GET", &uri, None, None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_availability_quotes_free_dates() {
        let f = fixture().await;
        book(&f, 5, 6).await;

        let uri = format!(
            "/api/boats/{}/availability?startDate={}&endDate={}",
            f.boat_id,
            days_ahead(8),
            days_ahead(9)
        );
        let (status, body) = send(&f.app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
        assert_eq!(body["totalPriceCents"], 100_000);

        let uri = format!(
            "/api/boats/{}/availability?startDate={}&endDate={}",
            f.boat_id,
            days_ahead(6),
            days_ahead(7)
        );
        let (_, body) = send(&f.app, "GET", &uri, None, None).await;
        assert_eq!(body["available"], false);
    }

    #[tokio::test]
    async fn test_booking_notifies_owner() {
        let f = fixture().await;
        book(&f, 3, 4).await;

        let (status, notes) = send(&f.app, "GET", "/api/notifications", Some(&f.owner), None).await;
        assert_eq!(status, StatusCode::OK);
        let notes = notes.as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["kind"], "booking_created");

        let id = notes[0]["id"].as_str().unwrap();
        let (status, _) = send(
            &f.app,
            "PATCH",
            &format!("/api/notifications/{id}/read"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, note) = send(
            &f.app,
            "PATCH",
            &format!("/api/notifications/{id}/read"),
            Some(&f.owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(note["read"], true);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let f = fixture().await;
        let booking = book(&f, 7, 8).await;
        let uri = format!("/api/bookings/{}/status", booking["id"].as_str().unwrap());

        // Customers cannot confirm their own booking.
        let (status, _) = send(
            &f.app,
            "PATCH",
            &uri,
            Some(&f.customer),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &f.app,
            "PATCH",
            &uri,
            Some(&f.owner),
            Some(json!({ "status": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "No se puede cambiar el estado de la reserva de pending a completed"
        );

        let (status, body) = send(
            &f.app,
            "PATCH",
            &uri,
            Some(&f.owner),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "confirmed");
    }

    #[tokio::test]
    async fn test_cancel_frees_the_dates() {
        let f = fixture().await;
        let booking = book(&f, 15, 16).await;
        let id = booking["id"].as_str().unwrap();

        let (status, body) = send(
            &f.app,
            "POST",
            &format!("/api/bookings/{id}/cancel"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "cancelled");

        let (status, _) = send(
            &f.app,
            "POST",
            &format!("/api/bookings/{id}/cancel"),
            Some(&f.customer),
            Some(json!({ "reason": "otra vez" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        book(&f, 15, 16).await;
    }

    #[tokio::test]
    async fn test_strangers_cannot_see_bookings() {
        let f = fixture().await;
        let booking = book(&f, 2, 2).await;
        let stranger = register(&f.app, "x@example.com", "customer").await;

        let uri = format!("/api/bookings/{}", booking["id"].as_str().unwrap());
        let (status, _) = send(&f.app, "GET", &uri, Some(&stranger), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&f.app, "GET", &uri, Some(&f.owner), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, mine) = send(&f.app, "GET", "/api/bookings", Some(&stranger), None).await;
        assert!(mine.as_array().unwrap().is_empty());

        let (status, _) = send(
            &f.app,
            "GET",
            &format!("/api/bookings?userId={}", Uuid::new_v4()),
            Some(&stranger),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_zelle_payment_confirms_booking() {
        let f = fixture().await;
        let booking = book(&f, 30, 31).await;
        let id = booking["id"].as_str().unwrap();

        let request = json!({
            "bookingId": id,
            "amountCents": booking["totalPriceCents"],
            "method": "zelle",
            "details": { "email": "pago@example.com", "reference": "ZL-123" },
        });

        let (status, _) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.owner),
            Some(request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, outcome) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{outcome}");
        assert_eq!(outcome["payment"]["status"], "completed");
        assert_eq!(outcome["booking"]["status"], "confirmed");
        assert_eq!(outcome["booking"]["paymentStatus"], "paid");

        let (status, body) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(request),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "La reserva ya está pagada");

        let (status, payments) = send(
            &f.app,
            "GET",
            &format!("/api/bookings/{id}/payments"),
            Some(&f.owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payments.as_array().unwrap().len(), 1);

        let payment_id = outcome["payment"]["id"].as_str().unwrap();
        let (status, payment) = send(
            &f.app,
            "GET",
            &format!("/api/payments/{payment_id}"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payment["method"], "zelle");

        // Cancelling a paid booking refunds it.
        let (status, cancelled) = send(
            &f.app,
            "POST",
            &format!("/api/bookings/{id}/cancel"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["paymentStatus"], "refunded");

        let (_, payment) = send(
            &f.app,
            "GET",
            &format!("/api/payments/{payment_id}"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(payment["status"], "refunded");
    }

    #[tokio::test]
    async fn test_payment_amount_and_details_are_checked() {
        let f = fixture().await;
        let booking = book(&f, 40, 40).await;
        let id = booking["id"].as_str().unwrap();

        let (status, body) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(json!({
                "bookingId": id,
                "amountCents": 1,
                "method": "cash",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "El monto no coincide con el total de la reserva");

        let (status, _) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(json!({
                "bookingId": id,
                "amountCents": booking["totalPriceCents"],
                "method": "pago_movil",
                "details": { "phone": "04141234567", "bankCode": "12", "reference": "PM-1" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, outcome) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(json!({
                "bookingId": id,
                "amountCents": booking["totalPriceCents"],
                "method": "cash",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(outcome["payment"]["status"], "pending");
        assert_eq!(outcome["booking"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_reservation_hold_blocks_others_until_confirmed() {
        let f = fixture().await;
        let other = register(&f.app, "other@example.com", "customer").await;

        let (status, hold) = send(
            &f.app,
            "POST",
            "/api/reservations",
            Some(&f.customer),
            Some(booking_body(&f.boat_id, 50, 52)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{hold}");
        let hold_id = hold["id"].as_str().unwrap();

        let (status, body) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&other),
            Some(booking_body(&f.boat_id, 51, 53)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "Las fechas seleccionadas están retenidas temporalmente por otro usuario"
        );

        let confirm = format!("/api/reservations/{hold_id}/confirm");
        let (status, _) = send(&f.app, "POST", &confirm, Some(&other), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, booking) = send(
            &f.app,
            "POST",
            &confirm,
            Some(&f.customer),
            Some(json!({ "notes": "Llegamos temprano" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{booking}");
        assert_eq!(booking["status"], "pending");
        assert_eq!(booking["notes"], "Llegamos temprano");

        // The hold is gone once it became a booking.
        let (status, _) = send(&f.app, "POST", &confirm, Some(&f.customer), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_released_hold_frees_dates() {
        let f = fixture().await;
        let other = register(&f.app, "other@example.com", "customer").await;

        let (_, hold) = send(
            &f.app,
            "POST",
            "/api/reservations",
            Some(&f.customer),
            Some(booking_body(&f.boat_id, 60, 60)),
        )
        .await;
        let uri = format!("/api/reservations/{}", hold["id"].as_str().unwrap());

        let (status, _) = send(&f.app, "DELETE", &uri, Some(&other), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&f.app, "DELETE", &uri, Some(&f.customer), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&other),
            Some(booking_body(&f.boat_id, 60, 60)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_reviews_need_a_completed_rental() {
        let f = fixture().await;
        let booking = book(&f, 9, 9).await;
        let status_uri = format!("/api/bookings/{}/status", booking["id"].as_str().unwrap());
        let reviews_uri = format!("/api/boats/{}/reviews", f.boat_id);
        let review = json!({ "rating": 4, "comment": "Excelente" });

        let (status, _) = send(
            &f.app,
            "POST",
            &reviews_uri,
            Some(&f.customer),
            Some(review.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        for next in ["confirmed", "completed"] {
            let (status, _) = send(
                &f.app,
                "PATCH",
                &status_uri,
                Some(&f.owner),
                Some(json!({ "status": next })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, posted) = send(
            &f.app,
            "POST",
            &reviews_uri,
            Some(&f.customer),
            Some(review.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{posted}");
        assert_eq!(posted["rating"], 4);

        let (status, _) = send(&f.app, "POST", &reviews_uri, Some(&f.customer), Some(review)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, boat) = send(&f.app, "GET", &format!("/api/boats/{}", f.boat_id), None, None).await;
        assert_eq!(boat["reviewCount"], 1);
        assert_eq!(boat["rating"], 4.0);

        let (_, listed) = send(&f.app, "GET", &reviews_uri, None, None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &f.app,
            "POST",
            &reviews_uri,
            Some(&f.customer),
            Some(json!({ "rating": 6 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_boat_with_active_booking_cannot_be_deleted() {
        let f = fixture().await;
        let booking = book(&f, 12, 13).await;
        let boat_uri = format!("/api/boats/{}", f.boat_id);

        let (status, body) = send(&f.app, "DELETE", &boat_uri, Some(&f.owner), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "No se puede eliminar una embarcación con reservas activas"
        );

        let (status, _) = send(
            &f.app,
            "POST",
            &format!("/api/bookings/{}/cancel", booking["id"].as_str().unwrap()),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&f.app, "DELETE", &boat_uri, Some(&f.owner), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&f.app, "GET", &boat_uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expired_hold_cannot_be_confirmed() {
        let mut state = AppState::default();
        state.reservation_ttl = chrono::Duration::zero();
        let f = fixture_with(state).await;

        let (status, hold) = send(
            &f.app,
            "POST",
            "/api/reservations",
            Some(&f.customer),
            Some(booking_body(&f.boat_id, 20, 21)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{hold}");

        let confirm = format!("/api/reservations/{}/confirm", hold["id"].as_str().unwrap());
        let (status, body) = send(&f.app, "POST", &confirm, Some(&f.customer), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "La retención ha expirado");

        // An expired hold no longer blocks the dates.
        let other = register(&f.app, "other@example.com", "customer").await;
        let (status, _) = send(
            &f.app,
            "POST",
            "/api/bookings",
            Some(&other),
            Some(booking_body(&f.boat_id, 20, 21)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_stale_cancel_cannot_overwrite_a_payment() {
        let state = AppState::default();
        let f = fixture_with(state.clone()).await;
        let booking = book(&f, 25, 26).await;
        let id: Uuid = booking["id"].as_str().unwrap().parse().unwrap();

        // A writer that read the booking before it was paid.
        let snapshot = state.bookings.get_booking(id).await.unwrap().unwrap();

        let (status, outcome) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(json!({
                "bookingId": id,
                "amountCents": booking["totalPriceCents"],
                "method": "zelle",
                "details": { "email": "pago@example.com", "reference": "ZL-9" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{outcome}");

        let cancelled = Booking {
            status: BookingStatus::Cancelled,
            ..snapshot.clone()
        };
        let err = state
            .bookings
            .update_booking_if_unchanged(&cancelled, &snapshot)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        let (_, stored) = send(
            &f.app,
            "GET",
            &format!("/api/bookings/{id}"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(stored["status"], "confirmed");
        assert_eq!(stored["paymentStatus"], "paid");
    }

    /// Delegates to the in-memory store but loses every conditional write.
    struct LosingBookings(Arc<InMemoryRepository>);

    #[async_trait]
    impl BookingRepository for LosingBookings {
        async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
            self.0.get_booking(id).await
        }

        async fn list_bookings_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Booking>> {
            self.0.list_bookings_by_user(user_id).await
        }

        async fn list_bookings_by_boat(&self, boat_id: Uuid) -> RepoResult<Vec<Booking>> {
            self.0.list_bookings_by_boat(boat_id).await
        }

        async fn create_booking(&self, booking: &Booking) -> RepoResult<()> {
            self.0.create_booking(booking).await
        }

        async fn update_booking(&self, booking: &Booking) -> RepoResult<()> {
            self.0.update_booking(booking).await
        }

        async fn update_booking_if_unchanged(
            &self,
            booking: &Booking,
            _expected: &Booking,
        ) -> RepoResult<()> {
            Err(RepositoryError::conflict("Booking", booking.id))
        }
    }

    #[tokio::test]
    async fn test_failed_booking_write_marks_payment_failed() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut config = Config::default();
        config.auth = config.auth.with_bcrypt_cost(4);
        let mut state = AppState::from_repository(repo.clone(), &config);
        state.bookings = Arc::new(LosingBookings(repo));

        let f = fixture_with(state).await;
        let booking = book(&f, 35, 35).await;
        let id = booking["id"].as_str().unwrap();

        let (status, _) = send(
            &f.app,
            "POST",
            "/api/payments",
            Some(&f.customer),
            Some(json!({
                "bookingId": id,
                "amountCents": booking["totalPriceCents"],
                "method": "zelle",
                "details": { "email": "pago@example.com", "reference": "ZL-7" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, payments) = send(
            &f.app,
            "GET",
            &format!("/api/bookings/{id}/payments"),
            Some(&f.customer),
            None,
        )
        .await;
        let payments = payments.as_array().unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["status"], "failed");

        let (_, stored) = send(
            &f.app,
            "GET",
            &format!("/api/bookings/{id}"),
            Some(&f.customer),
            None,
        )
        .await;
        assert_eq!(stored["paymentStatus"], "unpaid");
    }
}
