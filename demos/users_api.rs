//! A small users API demonstrating modules, typed parameters, hooks and CORS settings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::info;
use microrest_rs::router::{Dispatcher, Endpoint, Hook, Module, ParamSpec, ParamType, RouteTable};
use microrest_rs::{HttpResponse, HttpServer, Method, ServerConfig, ServerError, ServerSettings, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

type Store = Arc<Mutex<HashMap<u64, User>>>;

fn users_module(store: Store) -> Module {
    let profiles = store.clone();
    let created = store;

    Module::new("users")
        .on_endpoint_reached(Hook::context(|ctx| {
            info!("{} {} params={:?}", ctx.method(), ctx.path(), ctx.params());
            Ok(())
        }))
        .endpoint(
            // GET /users/profile?id=1
            Endpoint::new(Method::GET, "profile", move |_ctx, params| {
                let id: i64 = params.get("id").unwrap_or(-1);
                let users = profiles
                    .lock()
                    .map_err(|_| ServerError::InternalError("user store poisoned".to_string()))?;
                match u64::try_from(id).ok().and_then(|id| users.get(&id)) {
                    Some(user) => HttpResponse::new(StatusCode::Ok).with_json(user),
                    None => Ok(HttpResponse::new(StatusCode::NotFound)
                        .with_message(&format!("No user with id {id}"))),
                }
            })
            .param(ParamSpec::optional("id", ParamType::Int).with_default(-1i64)),
        )
        .endpoint(
            // POST /users/create?name=Ann
            Endpoint::new_async(Method::POST, "create", move |_ctx, params| {
                let store = created.clone();
                async move {
                    let name: String = params.get("name").unwrap_or_default();
                    let Ok(mut users) = store.lock() else {
                        return Err(ServerError::InternalError("user store poisoned".to_string()));
                    };
                    let user = User {
                        id: users.len() as u64 + 1,
                        name,
                    };
                    users.insert(user.id, user.clone());
                    HttpResponse::new(StatusCode::Created).with_json(&user)
                }
            })
            .param(ParamSpec::required("name", ParamType::Str)),
        )
}

fn health_module() -> Module {
    Module::new("health").endpoint(Endpoint::new(Method::GET, "status", |_, _| {
        Ok(HttpResponse::new(StatusCode::Ok).with_message("ok"))
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/settings.json".to_string());
    let settings = ServerSettings::from_json_file(&settings_path)?;
    let config = ServerConfig::from_settings(&settings)?;

    let store: Store = Arc::new(Mutex::new(HashMap::new()));
    info!("Loaded settings from {settings_path}");
    let table = RouteTable::builder()
        .module(users_module(store))?
        .module(health_module())?
        .cors_policies(settings.cors_policies)?
        .build();

    let server = HttpServer::new(config, Dispatcher::new(Arc::new(table)));

    // Start the server
    server.start().await?;

    Ok(())
}
