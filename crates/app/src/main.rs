use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use adminboard_app::{AppConfig, AppContext, LoginError};
use adminboard_auth::FileSnapshotStore;
use adminboard_directory::{AccountDirectory, InMemoryAccountDirectory};

const USAGE: &str = "usage: adminboard [status | login <email> [--remember] | logout | navigate <path>]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    adminboard_observability::init();

    let config = AppConfig::from_env()?;
    tracing::info!(snapshot = %config.snapshot_path.display(), "starting adminboard");

    let directory: Arc<dyn AccountDirectory> = match config.read_directory()? {
        Some(raw) => Arc::new(
            InMemoryAccountDirectory::from_json(&raw).context("failed to load account listing")?,
        ),
        None => Arc::new(InMemoryAccountDirectory::seeded()),
    };
    let snapshots = Arc::new(FileSnapshotStore::new(&config.snapshot_path));

    let mut ctx = AppContext::new(directory, snapshots, &config.snapshot_key)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["status"] => status(&ctx),
        ["login", email, rest @ ..] => {
            let remember_me = rest.contains(&"--remember");
            match ctx.login(email, remember_me).await {
                Ok(outcome) => json!({ "login": outcome, "status": status(&ctx) }),
                Err(e) => login_failure(&e),
            }
        }
        ["logout"] => {
            ctx.logout();
            status(&ctx)
        }
        ["navigate", path] => json!({
            "path": path,
            "navigation": ctx.navigate(path)?,
        }),
        _ => anyhow::bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn status(ctx: &AppContext) -> serde_json::Value {
    let session = ctx.session();
    let routes: Vec<serde_json::Value> = ctx
        .routes()
        .routes
        .iter()
        .filter_map(|route| {
            let path = route.pattern.replace(":id", "1");
            let decision = ctx.navigate(&path).ok()?;
            Some(json!({ "route": route.pattern, "navigation": decision }))
        })
        .collect();

    json!({
        "session": session,
        "menu": ctx.visible_menu(),
        "features": ctx.enabled_features(),
        "routes": routes,
    })
}

fn login_failure(err: &LoginError) -> serde_json::Value {
    json!({
        "login": "failed",
        "field": err.field(),
        "message": err.message(),
    })
}
