//! HTTP handlers
//!
//! Public pages load the content once per request and render whatever was
//! read; dashboard endpoints expose the editable records and save actions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::SharedState;
use crate::aggregate::{load_content, AggregatedContent, SectionFailure};
use crate::dashboard::{self, AnalyticsPage, CampaignsPage, CommunityPage, OverviewPage};
use crate::editor::{save_collection, save_hero, SaveReport, SaveStatus};
use crate::model::{
    Collection, FocusArea, HeroContent, ImpactMetric, Record, Row, StatCard, Testimonial,
};
use crate::render::{
    render_analytics, render_community, render_contact, render_home, render_theme, FocusAreaView,
    HomePage,
};

/// Content for public pages; an unreachable store renders the defaults
async fn public_content(state: &SharedState) -> AggregatedContent {
    match load_content(state.store.as_ref()).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "Rendering defaults");
            AggregatedContent::default()
        }
    }
}

/// GET /
pub async fn home(State(state): State<SharedState>) -> Html<String> {
    let content = public_content(&state).await;
    Html(render_home(&HomePage::project(&content)))
}

/// GET /themes/:slug
pub async fn theme(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    let content = public_content(&state).await;
    let area = content
        .focus_area(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("focus area `{slug}`")))?;
    Ok(Html(render_theme(&FocusAreaView::from(area))))
}

/// GET /analytics
pub async fn analytics_page() -> Html<String> {
    Html(render_analytics(&dashboard::analytics()))
}

/// GET /community
pub async fn community_page() -> Html<String> {
    Html(render_community(&dashboard::community()))
}

/// GET /auth
pub async fn contact_page() -> Html<String> {
    Html(render_contact())
}

#[derive(Serialize)]
pub struct ContentResponse {
    pub page: HomePage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SectionFailure>,
}

/// GET /api/content
pub async fn api_content(State(state): State<SharedState>) -> Json<ContentResponse> {
    let mut content = public_content(&state).await;
    let failures = std::mem::take(&mut content.failures);
    Json(ContentResponse {
        page: HomePage::project(&content),
        failures,
    })
}

/// Records as store rows; columns that were null or absent are null
#[derive(Serialize)]
pub struct EditableContent {
    pub hero: Option<Row>,
    pub stats: Vec<Row>,
    pub metrics: Vec<Row>,
    pub focus_areas: Vec<Row>,
    pub testimonials: Vec<Row>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SectionFailure>,
}

fn to_rows<R: Record>(records: &[R]) -> Result<Vec<Row>, serde_json::Error> {
    records.iter().map(Record::to_row).collect()
}

/// GET /api/dashboard/content
pub async fn api_editable_content(
    State(state): State<SharedState>,
) -> Result<Json<EditableContent>, ApiError> {
    let content = load_content(state.store.as_ref()).await?;
    Ok(Json(EditableContent {
        hero: content.hero.as_ref().map(Record::to_row).transpose()?,
        stats: to_rows(&content.stats)?,
        metrics: to_rows(&content.metrics)?,
        focus_areas: to_rows(&content.focus_areas)?,
        testimonials: to_rows(&content.testimonials)?,
        failures: content.failures,
    }))
}

/// PUT /api/dashboard/content/:collection
///
/// The body is the hero row for `hero_content` and the whole row list for
/// every other collection. Null or missing columns are not written.
pub async fn api_save(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let collection: Collection = collection.parse()?;
    let store = state.store.as_ref();

    let report = match collection {
        Collection::HeroContent => {
            let hero = decode_record::<HeroContent>(decode(body)?)?;
            save_hero(store, &hero).await
        }
        Collection::StatsCards => save_collection(store, &decode_records::<StatCard>(body)?).await,
        Collection::ImpactMetrics => {
            save_collection(store, &decode_records::<ImpactMetric>(body)?).await
        }
        Collection::FocusAreas => {
            save_collection(store, &decode_records::<FocusArea>(body)?).await
        }
        Collection::Testimonials => {
            save_collection(store, &decode_records::<Testimonial>(body)?).await
        }
    };

    Ok((save_status(&report), Json(report)))
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn decode_record<R: Record>(row: Row) -> Result<R, ApiError> {
    R::from_row(row).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn decode_records<R: Record>(body: Value) -> Result<Vec<R>, ApiError> {
    decode::<Vec<Row>>(body)?
        .into_iter()
        .map(decode_record)
        .collect()
}

fn save_status(report: &SaveReport) -> StatusCode {
    match report.status {
        SaveStatus::Success => StatusCode::OK,
        SaveStatus::PartialFailure => StatusCode::MULTI_STATUS,
        SaveStatus::Failure => StatusCode::BAD_GATEWAY,
    }
}

/// Editable field names per collection, for building dashboard forms
#[derive(Serialize)]
pub struct FieldsResponse {
    pub collection: Collection,
    pub fields: &'static [&'static str],
}

/// GET /api/dashboard/fields
pub async fn api_fields() -> Json<Vec<FieldsResponse>> {
    fn entry<R: Record>() -> FieldsResponse {
        FieldsResponse {
            collection: R::COLLECTION,
            fields: R::editable_fields(),
        }
    }

    Json(vec![
        entry::<HeroContent>(),
        entry::<StatCard>(),
        entry::<ImpactMetric>(),
        entry::<FocusArea>(),
        entry::<Testimonial>(),
    ])
}

/// GET /api/dashboard/overview
pub async fn api_overview() -> Json<OverviewPage> {
    Json(dashboard::overview())
}

/// GET /api/dashboard/campaigns
pub async fn api_campaigns() -> Json<CampaignsPage> {
    Json(dashboard::campaigns())
}

/// GET /api/dashboard/community
pub async fn api_community() -> Json<CommunityPage> {
    Json(dashboard::community())
}

/// GET /api/dashboard/analytics
pub async fn api_analytics() -> Json<AnalyticsPage> {
    Json(dashboard::analytics())
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}
