use crate::catchers::*;
use crate::configuration::Settings;
use crate::port_saver;
use crate::port_saver::Port;
use crate::routes::*;
use crate::schema::create_tables;
use diesel::SqliteConnection;
use rocket::fairing::AdHoc;
use rocket::figment::util::map;
use rocket::{Build, Ignite, Rocket};
use rocket_sync_db_pools::database;

/// Pooled handle to the SQLite store, handed to handlers as a request guard.
#[database("cuidartrite")]
pub struct CuidArtriteDbConn(SqliteConnection);

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    pub async fn build(configuration: &Settings) -> Result<Application, rocket::Error> {
        let (port_saver, port) = port_saver::create_pair();
        let figment = rocket::Config::figment()
            .merge(("address", configuration.application.host))
            .merge(("port", configuration.application.port.unwrap_or(0)))
            .merge(("log_level", "critical"))
            .merge((
                "databases",
                map!["cuidartrite" => configuration.database.pool_config()],
            ));

        let server = rocket::custom(figment)
            .attach(port_saver)
            .attach(CuidArtriteDbConn::fairing())
            .attach(AdHoc::try_on_ignite("Create tables", ensure_tables))
            .mount(
                "/",
                routes![
                    home,
                    health_check,
                    register,
                    login,
                    update_user,
                    add_pain,
                    add_practice,
                    get_all_data
                ],
            )
            .register("/", catchers![default_catcher])
            .ignite()
            .await?;
        Ok(Application { server, port })
    }
}

async fn ensure_tables(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let conn = match CuidArtriteDbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            tracing::error!("No database connection available to create tables");
            return Err(rocket);
        }
    };
    match conn.run(|c| create_tables(c)).await {
        Ok(()) => Ok(rocket),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to create tables");
            Err(rocket)
        }
    }
}
