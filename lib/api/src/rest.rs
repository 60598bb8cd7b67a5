use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subx_core::{Error, Recipe, RecipeId};
use subx_similarity::{EngineConfig, ExplainedSubstitute, Resources, Weights};
use subx_storage::ResourceManager;

pub const SERVICE_NAME: &str = "subx";

const DEFAULT_PAGE_SIZE: usize = 50;
const SEARCH_LIMIT: usize = 20;

/// Tokenizer leftovers hidden from listed ingredients (exact match)
const DISPLAY_STOPWORDS: &[&str] = &[
    "썰은", "쪽파나", "등", "약간", "적당량", "반개", "한개", "두개", "개", "마리", "장", "모두",
    "다진", "채썬", "갈은", "물", "소금", "참기름", "식용유", "후추",
];

fn default_weight() -> f32 {
    0.5
}

#[derive(Deserialize)]
struct IngredientRequest {
    recipe_id: RecipeId,
    target: Vec<String>,
    #[serde(default)]
    stopwords: Vec<String>,
    #[serde(default = "default_weight")]
    w_w2v: f32,
    #[serde(default = "default_weight")]
    w_d2v: f32,
    #[serde(default)]
    w_method: f32,
    #[serde(default)]
    w_cat: f32,
}

impl IngredientRequest {
    fn weights(&self) -> Weights {
        Weights::new(self.w_w2v, self.w_d2v, self.w_method, self.w_cat)
    }
}

#[derive(Deserialize)]
struct CustomContextRequest {
    context_ings: Vec<String>,
    target: Vec<String>,
    #[serde(default)]
    stopwords: Vec<String>,
    #[serde(default = "default_weight")]
    w_w2v: f32,
    #[serde(default = "default_weight")]
    w_d2v: f32,
    #[serde(default)]
    excluded: Vec<String>,
}

#[derive(Deserialize)]
struct PageQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct RecipeView {
    id: RecipeId,
    name: String,
    ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl RecipeView {
    fn new(recipe: &Recipe, resources: &Resources) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            ingredients: display_ingredients(resources, &recipe.ingredients),
            method: recipe.method.clone(),
            category: recipe.category.clone(),
        }
    }

    /// Search results list only id, name and ingredients
    fn summary(recipe: &Recipe, resources: &Resources) -> Self {
        Self {
            method: None,
            category: None,
            ..Self::new(recipe, resources)
        }
    }
}

/// Drop global stopwords and display stopwords from an ingredient list
fn display_ingredients(resources: &Resources, ingredients: &[String]) -> Vec<String> {
    ingredients
        .iter()
        .filter(|ing| !resources.stopwords.contains(ing.as_str()))
        .filter(|ing| !DISPLAY_STOPWORDS.contains(&ing.as_str()))
        .cloned()
        .collect()
}

fn error_response(err: &Error) -> HttpResponse {
    let status = match err {
        Error::NotReady | Error::LoadFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::RecipeNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidTarget(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() && !err.is_retryable() {
        tracing::error!("Request failed: {}", err);
    }
    HttpResponse::build(status).json(serde_json::json!({
        "error": err.to_string()
    }))
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ResourceManager>,
    pub engine: EngineConfig,
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
    pub engine: EngineConfig,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(manager: Arc<ResourceManager>, settings: ApiSettings) -> std::io::Result<()> {
        let state = AppState {
            manager,
            engine: settings.engine.clone(),
        };
        let origins = settings.allowed_origins.clone();

        HttpServer::new(move || {
            App::new()
                .wrap(cors(&origins))
                .app_data(web::Data::new(state.clone()))
                .configure(Self::routes)
        })
        .bind(("0.0.0.0", settings.port))?
        .run()
        .await
    }

    /// Register every route. `/recipes/search` must precede `/recipes/{id}`.
    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(health_check))
            .route("/recipes", web::get().to(list_recipes))
            .route("/recipes/search", web::get().to(search_recipes))
            .route("/recipes/{id}", web::get().to(get_recipe))
            .route("/recommend/db/single", web::post().to(recommend_db_single))
            .route("/recommend/db/multi", web::post().to(recommend_db_multi))
            .route("/recommend/custom/single", web::post().to(recommend_custom_single));
    }
}

fn cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let status = state.manager.state();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": status.as_str(),
        "service": SERVICE_NAME,
    })))
}

async fn list_recipes(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    let resources = match state.manager.ready() {
        Ok(r) => r,
        Err(e) => return Ok(error_response(&e)),
    };

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    let recipes: Vec<RecipeView> = resources
        .catalog
        .page(offset, limit)
        .iter()
        .map(|r| RecipeView::new(r, &resources))
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": resources.catalog.len(),
        "recipes": recipes,
    })))
}

async fn search_recipes(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> ActixResult<HttpResponse> {
    let resources = match state.manager.ready() {
        Ok(r) => r,
        Err(e) => return Ok(error_response(&e)),
    };

    let results: Vec<RecipeView> = resources
        .catalog
        .search(&query.q, SEARCH_LIMIT)
        .into_iter()
        .map(|r| RecipeView::summary(r, &resources))
        .collect();
    Ok(HttpResponse::Ok().json(results))
}

async fn get_recipe(
    state: web::Data<AppState>,
    path: web::Path<RecipeId>,
) -> ActixResult<HttpResponse> {
    let resources = match state.manager.ready() {
        Ok(r) => r,
        Err(e) => return Ok(error_response(&e)),
    };

    let id = path.into_inner();
    match resources.catalog.get(id) {
        Some(recipe) => Ok(HttpResponse::Ok().json(RecipeView::new(recipe, &resources))),
        None => Ok(error_response(&Error::RecipeNotFound(id))),
    }
}

async fn recommend_db_single(
    state: web::Data<AppState>,
    req: web::Json<IngredientRequest>,
) -> ActixResult<HttpResponse> {
    let engine = match state.manager.engine(state.engine.clone()) {
        Ok(e) => e,
        Err(e) => return Ok(error_response(&e)),
    };
    let Some(target) = req.target.first() else {
        return Ok(error_response(&Error::InvalidTarget("Target ingredient required".to_string())));
    };

    match engine.substitute_single(req.recipe_id, target, &req.stopwords, req.weights()) {
        Ok(ranked) => Ok(HttpResponse::Ok().json(ExplainedSubstitute::from_ranked_list(ranked))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn recommend_db_multi(
    state: web::Data<AppState>,
    req: web::Json<IngredientRequest>,
) -> ActixResult<HttpResponse> {
    let engine = match state.manager.engine(state.engine.clone()) {
        Ok(e) => e,
        Err(e) => return Ok(error_response(&e)),
    };

    match engine.substitute_multi(req.recipe_id, &req.target, &req.stopwords, req.weights()) {
        Ok(combinations) => Ok(HttpResponse::Ok().json(combinations)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn recommend_custom_single(
    state: web::Data<AppState>,
    req: web::Json<CustomContextRequest>,
) -> ActixResult<HttpResponse> {
    let engine = match state.manager.engine(state.engine.clone()) {
        Ok(e) => e,
        Err(e) => return Ok(error_response(&e)),
    };
    let Some(target) = req.target.first() else {
        return Ok(error_response(&Error::InvalidTarget("Target ingredient required".to_string())));
    };

    match engine.substitute_single_custom(
        target,
        &req.context_ings,
        &req.stopwords,
        req.w_w2v,
        req.w_d2v,
        &req.excluded,
    ) {
        Ok(ranked) => Ok(HttpResponse::Ok().json(ExplainedSubstitute::from_ranked_list(ranked))),
        Err(e) => Ok(error_response(&e)),
    }
}
