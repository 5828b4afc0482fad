use lesson_admin::application_port::*;
use lesson_admin::console::*;
use lesson_admin::domain_model::*;
use lesson_admin::logger::*;
use lesson_admin::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    // invalid or missing settings end the process here
    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let console = Console::try_new(&project_settings)?;

    match cli.command {
        Command::Login {
            user_id,
            name,
            access_token,
            refresh_token,
        } => {
            let user = User::new(user_id, name);
            console
                .session_service
                .start_session(&user, &TokenPair::new(access_token, refresh_token));
            info!(user_id = %user.id, "session stored");
        }
        Command::Whoami => match console.session_service.current_user() {
            Some(user) => println!("{} ({})", user.name, user.id),
            None => println!("not logged in"),
        },
        Command::Logout => console.logout(),
        Command::Get { path } => {
            let result = console.private_api.send(ApiRequest::get(path)).await;
            match result {
                Ok(response) => println!("{}", response.text()),
                Err(e) if e.is_session_expired() => {
                    error!(error = %e, route = %console.login_route(), "session expired");
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    console.shutdown();
    Ok(())
}
