use config_store::{ConfigStore, Value};

fn main() -> Result<(), config_store::ConfigError> {
    let mut store = ConfigStore::init("demos/config");

    let port: u16 = store.get_as("config.server.port")?;
    println!("Server: {}:{}", store.get("config.server.host")?, port);
    println!("Log file: {}", store.get_replaced("config.server.log")?);
    println!("Workers: {}", store.get_or("config.server.workers", 4)?);

    if let Some(credentials) = store.get_to_user_pwd("config.auth", 0)? {
        println!("Basic auth: {credentials}");
    }

    store.set("config.server.host", Value::String("0.0.0.0".into()))?;
    for (key, value) in store.sweep_default()? {
        println!("{key} = {value}");
    }

    Ok(())
}
