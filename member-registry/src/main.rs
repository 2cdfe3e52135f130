//! Command-line host for the registry
//!
//! ```text
//! member-registry list [search] [state]
//! member-registry register fullName=... email=... [photo=path] [staffId=path] [idCard=path]
//! member-registry theme
//! ```

use std::path::Path;
use std::sync::Arc;

use member_registry::{
    AttachmentKind, DirectoryRenderer, DirectoryView, FileDescriptor, FormFields, KeyValueBackend,
    MemberQuery, RedbBackend, RegistrationController, RegistryConfig, ThemeStore, setup_environment,
};

struct ConsoleRenderer;

impl DirectoryRenderer for ConsoleRenderer {
    fn render(&self, view: &DirectoryView<'_>) {
        if view.is_empty() {
            if view.total == 0 {
                println!("No registered members yet.");
            } else {
                println!("No members match your search.");
            }
            return;
        }

        println!("Showing {} of {} members", view.visible_count(), view.total);
        for member in &view.members {
            println!(
                "  #{:<14} {} | {} | {} | {} years | {}",
                member.id,
                member.full_name,
                member.school,
                member.state,
                member.years_experience,
                member.teaching_level.display_name(),
            );
        }
        if !view.states.is_empty() {
            println!("States: {}", view.states.join(", "));
        }
    }
}

fn attachment_slot(key: &str) -> Option<AttachmentKind> {
    match key {
        "photo" | "passportPhoto" => Some(AttachmentKind::PassportPhoto),
        "staffId" => Some(AttachmentKind::StaffId),
        "idCard" => Some(AttachmentKind::IdCard),
        _ => None,
    }
}

fn read_file(path: &str) -> anyhow::Result<FileDescriptor> {
    let name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string();
    let data = std::fs::read(path)?;
    Ok(FileDescriptor::new(name, None, data))
}

async fn register(
    controller: &mut RegistrationController<ConsoleRenderer>,
    args: &[String],
) -> anyhow::Result<()> {
    let mut fields = FormFields::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            anyhow::bail!("expected key=value, got '{arg}'");
        };
        match attachment_slot(key) {
            Some(kind) => {
                // Rejections are already reported as notifications
                let _ = controller.select_attachment(kind, read_file(value)?).await;
            }
            None => {
                fields.insert(key.to_string(), value.to_string());
            }
        }
    }

    if let Err(e) = controller.submit_form(&fields) {
        if let Some(field) = e.focus_target() {
            eprintln!("Check the '{field}' field");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    dotenv::dotenv().ok();
    let config = RegistryConfig::from_env();
    setup_environment(&config)?;

    // 2. Storage
    let backend: Arc<dyn KeyValueBackend> =
        Arc::new(RedbBackend::open(config.database_path(), config.storage_quota_bytes)?);
    tracing::info!(path = %config.database_path().display(), "Registry database opened");

    // 3. Dispatch
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("list");

    if command == "theme" {
        let theme = ThemeStore::new(backend).toggle()?;
        println!("Theme: {theme}");
        return Ok(());
    }

    let controller = match command {
        "list" => {
            let query = MemberQuery::new(
                args.get(1).cloned().unwrap_or_default(),
                args.get(2).cloned().unwrap_or_default(),
            );
            RegistrationController::open_with_query(&config, backend, ConsoleRenderer, query)
        }
        "register" => {
            let mut controller = RegistrationController::open(&config, backend, ConsoleRenderer);
            register(&mut controller, &args[1..]).await?;
            controller
        }
        other => anyhow::bail!("unknown command '{other}' (expected list, register or theme)"),
    };

    for notification in controller.notifications().active() {
        println!("[{:?}] {}", notification.kind, notification.message);
    }

    Ok(())
}
