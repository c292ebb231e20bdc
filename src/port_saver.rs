use rocket::fairing::Info;
use rocket::{Orbit, Rocket};
use tokio::sync::{mpsc, Mutex};

/// Split a liftoff notifier from the handle that waits on it.
pub fn create_pair() -> (PortSaver, Port) {
    let (tx, rx) = mpsc::channel(1);
    let port_saver = PortSaver::new(tx);
    let port = Port::new(rx);
    (port_saver, port)
}

/// The port the server actually bound, known once Rocket has lifted off.
pub struct Port {
    port: Mutex<Option<u16>>,
    rx: Mutex<mpsc::Receiver<u16>>,
}

impl Port {
    fn new(rx: mpsc::Receiver<u16>) -> Port {
        Port {
            port: Mutex::new(None),
            rx: Mutex::new(rx),
        }
    }

    /// Waits for liftoff. `None` if the server was dropped before binding.
    pub async fn get(&self) -> Option<u16> {
        let mut port = self.port.lock().await;
        if port.is_none() {
            *port = self.rx.lock().await.recv().await;
        }
        *port
    }
}

pub struct PortSaver {
    sender: mpsc::Sender<u16>,
}

impl PortSaver {
    fn new(sender: mpsc::Sender<u16>) -> PortSaver {
        PortSaver { sender }
    }
}

#[rocket::async_trait]
impl rocket::fairing::Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: rocket::fairing::Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        tracing::info!(port, "Server is listening");
        if self.sender.send(port).await.is_err() {
            tracing::debug!("Nobody is waiting for the bound port");
        }
    }
}
