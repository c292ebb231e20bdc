use cuidartrite::configuration::get_configuration;
use cuidartrite::startup::Application;
use cuidartrite::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let subscriber = get_subscriber("cuidartrite".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(&configuration).await?;
    application.server.launch().await?;
    Ok(())
}
