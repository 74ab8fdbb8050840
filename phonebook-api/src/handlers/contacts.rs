use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{CreateContactRequest, FilterChangeRequest};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::helpers::page::{render_page, PageView};
use crate::store::{ContactStore, ContactStoreError};

#[derive(Clone)]
pub struct PhonebookAppState {
    pub store: Arc<Mutex<ContactStore>>,
}

impl PhonebookAppState {
    pub fn new(store: ContactStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> ActixResult<MutexGuard<'_, ContactStore>> {
        self.store.lock().map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!(
                "Failed to acquire contact store lock: {}",
                e
            ))
        })
    }
}

fn page_response(status: StatusCode, store: &ContactStore, notice: Option<&str>) -> HttpResponse {
    let visible = store.visible_contacts();
    let body = render_page(&PageView {
        contacts: &visible,
        filter: store.filter(),
        notice,
    });

    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn back_to_page() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

pub async fn show_page(data: web::Data<PhonebookAppState>) -> ActixResult<HttpResponse> {
    let store = data.lock()?;
    Ok(page_response(StatusCode::OK, &store, None))
}

pub async fn create_contact(
    data: web::Data<PhonebookAppState>,
    form: web::Form<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    let request = form.into_inner();
    let mut store = data.lock()?;

    match store.add_contact(&request.name, &request.number) {
        Ok(_) => Ok(back_to_page()),
        Err(ContactStoreError::Duplicate(err)) => Ok(page_response(
            StatusCode::CONFLICT,
            &store,
            Some(&err.to_string()),
        )),
        Err(err @ ContactStoreError::EmptyField(_)) => Ok(page_response(
            StatusCode::BAD_REQUEST,
            &store,
            Some(&err.to_string()),
        )),
        Err(ContactStoreError::Storage(e)) => {
            tracing::error!("Failed to save new contact: {:#}", e);
            Err(actix_web::error::ErrorInternalServerError(e.to_string()))
        }
    }
}

pub async fn delete_contact(
    data: web::Data<PhonebookAppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let mut store = data.lock()?;

    store.remove_contact(&contact_id).map_err(|e| {
        tracing::error!("Failed to remove contact {}: {}", contact_id, e);
        actix_web::error::ErrorInternalServerError(e.to_string())
    })?;

    Ok(back_to_page())
}

pub async fn change_filter(
    data: web::Data<PhonebookAppState>,
    form: web::Form<FilterChangeRequest>,
) -> ActixResult<HttpResponse> {
    let mut store = data.lock()?;
    store.set_filter(&form.filter);
    Ok(back_to_page())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(show_page))
        .route("/contacts", web::post().to(create_contact))
        .route("/contacts/{id}/delete", web::post().to(delete_contact))
        .route("/filter", web::post().to(change_filter));
}
