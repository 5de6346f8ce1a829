//! HTML page handlers.

use crate::web::security::CspNonce;
use crate::web::state::AppState;
use crate::web::templates::{
    render_html, CareerTemplate, CareerView, ConsultingTemplate, ContactTemplate,
    ExperienceCard, ExperienceTemplate, HomeTemplate, Layout, NavLink, NotFoundTemplate,
    PresentationView, HOME_NAV, PAGE_NAV,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

async fn layout(state: &AppState, nonce: CspNonce, nav: &'static [NavLink]) -> Layout {
    let meta = state.content().meta_data().await;
    Layout::new(meta, state.env().clone(), nonce.0, nav)
}

/// Landing page: presentation, career, about and skills.
///
/// The `home` gist fills whatever the dedicated sections leave empty.
pub async fn home(State(state): State<AppState>, nonce: CspNonce) -> Response {
    let content = state.content();
    let (meta, presentation, career, about, skills, home) = tokio::join!(
        content.meta_data(),
        content.presentation_data(),
        content.career_data(),
        content.about_data(),
        content.skills_data(),
        content.home_data(),
    );

    let presentation = home.complete(presentation);
    let about = if about.is_empty() { home.about } else { about };
    let skills = if skills.is_empty() { home.skills } else { skills };

    let template = HomeTemplate {
        layout: Layout::new(meta, state.env().clone(), nonce.0, &HOME_NAV),
        presentation: PresentationView::new(&presentation, &state.env().cv_pdf_link),
        career: CareerView::from(&career),
        about,
        skills,
    };
    render_html(StatusCode::OK, &template)
}

pub async fn career(State(state): State<AppState>, nonce: CspNonce) -> Response {
    let (layout, career) = tokio::join!(
        layout(&state, nonce, &PAGE_NAV),
        state.content().career_data()
    );

    let template = CareerTemplate {
        layout: layout.with_title("Career"),
        career: CareerView::from(&career),
    };
    render_html(StatusCode::OK, &template)
}

pub async fn consulting(State(state): State<AppState>, nonce: CspNonce) -> Response {
    let (layout, consulting) = tokio::join!(
        layout(&state, nonce, &PAGE_NAV),
        state.content().consulting_data()
    );

    let template = ConsultingTemplate::new(layout.with_title("Consulting"), &consulting);
    render_html(StatusCode::OK, &template)
}

pub async fn contact(State(state): State<AppState>, nonce: CspNonce) -> Response {
    let (layout, contact) = tokio::join!(
        layout(&state, nonce, &PAGE_NAV),
        state.content().contact_data()
    );

    let template = ContactTemplate::new(layout.with_title("Contact"), &contact);
    render_html(StatusCode::OK, &template)
}

pub async fn experience(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    nonce: CspNonce,
) -> Response {
    let (layout, experience) = tokio::join!(
        layout(&state, nonce, &PAGE_NAV),
        state.content().experience_by_id(&slug)
    );

    match experience {
        Some(experience) => {
            let template = ExperienceTemplate {
                layout: layout.with_title(&experience.position),
                experience: ExperienceCard::from(&experience),
            };
            render_html(StatusCode::OK, &template)
        }
        None => {
            tracing::debug!("Unknown experience id: {}", slug);
            not_found_page(layout)
        }
    }
}

/// Router fallback.
pub async fn not_found(State(state): State<AppState>, nonce: CspNonce) -> Response {
    not_found_page(layout(&state, nonce, &PAGE_NAV).await)
}

fn not_found_page(layout: Layout) -> Response {
    let template = NotFoundTemplate {
        layout: layout.with_title("Not found"),
    };
    render_html(StatusCode::NOT_FOUND, &template)
}
