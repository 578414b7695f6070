use limerick_bot::agent::{Agent, OpenAiRuntime};
use limerick_bot::chat::ChatSession;
use limerick_bot::config::BotConfig;
use limerick_bot::logging::theme;
use limerick_bot::{http, logging, tools};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return;
        }
    };

    logging::init(&config.logging);

    let client = match http::build_client(&config.services.user_agent) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{:#}", e);
            return;
        }
    };

    let BotConfig {
        model, services, ..
    } = config;

    let agent = Agent::limerick_bot(tools::standard_tools(&client, &services));
    let runtime = OpenAiRuntime::new(model);
    let mut session = ChatSession::new(agent, runtime);

    let stdin = std::io::stdin();
    if let Err(e) = session.run(stdin.lock(), std::io::stdout()).await {
        tracing::error!("{}", e);
        eprintln!("{}", theme::error(&e.user_message()));
    }
}
