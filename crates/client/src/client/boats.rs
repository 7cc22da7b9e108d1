//! Boat API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::rental::{
    AvailabilityQuery, AvailabilityResponse, Boat, BoatSearch, CreateBoatRequest,
    CreateReviewRequest, ListBoatsQuery, Review, UpdateBoatRequest,
};
use chrono::NaiveDate;
use uuid::Uuid;

impl BoatrentClient {
    /// List boats, optionally only those of one owner.
    pub async fn list_boats(&self, owner_id: Option<Uuid>) -> Result<Vec<Boat>> {
        let response = self
            .get("/api/boats")
            .query(&ListBoatsQuery { owner_id })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Search boats by text, type, capacity, price and free dates.
    pub async fn search_boats(&self, search: &BoatSearch) -> Result<Vec<Boat>> {
        let response = self.get("/api/boats/search").query(search).send().await?;
        self.handle_response(response).await
    }

    /// Get boat by ID.
    pub async fn get_boat(&self, id: Uuid) -> Result<Boat> {
        let response = self.get(&format!("/api/boats/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Publish a boat.
    pub async fn create_boat(&self, request: &CreateBoatRequest) -> Result<Boat> {
        let response = self.post("/api/boats").json(request).send().await?;
        self.handle_response(response).await
    }

    /// Update a boat. Absent fields are left unchanged.
    pub async fn update_boat(&self, id: Uuid, request: &UpdateBoatRequest) -> Result<Boat> {
        let response = self
            .put(&format!("/api/boats/{}", id))
            .json(request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete boat by ID.
    pub async fn delete_boat(&self, id: Uuid) -> Result<()> {
        let response = self.delete(&format!("/api/boats/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }

    /// Check whether a boat is free between two dates.
    pub async fn check_availability(
        &self,
        id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<AvailabilityResponse> {
        let response = self
            .get(&format!("/api/boats/{}/availability", id))
            .query(&AvailabilityQuery {
                start_date,
                end_date,
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Reviews of a boat, newest first.
    pub async fn list_reviews(&self, boat_id: Uuid) -> Result<Vec<Review>> {
        let response = self
            .get(&format!("/api/boats/{}/reviews", boat_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Review a boat after a completed rental.
    pub async fn create_review(&self, boat_id: Uuid, request: &CreateReviewRequest) -> Result<Review> {
        let response = self
            .post(&format!("/api/boats/{}/reviews", boat_id))
            .json(request)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
