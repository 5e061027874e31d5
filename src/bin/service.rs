use polling_station_lookup::{Config, LookupOutcome, RawForm, Session, init_logging, load_index};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    init_logging(config.quiet);

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.len() == 4 {
        let form = RawForm {
            sector: Some(args[0].clone()),
            subdistrict: Some(args[1].clone()),
            gender: Some(args[2].clone()),
            value: Some(args[3].clone()),
        };

        let session = match load_index(&config.data).await {
            Ok(loaded) => Session::with_index(loaded),
            Err(err) => {
                eprintln!("Error loading station data: {}", err);
                std::process::exit(1);
            }
        };

        match session.lookup(&form) {
            LookupOutcome::Found { record, matches } => {
                println!("{} {}", record.center[0], record.center[1]);
                if matches > 1 {
                    eprintln!("{matches} stations match, showing the first");
                }
            }
            LookupOutcome::Invalid(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
            _ => {
                eprintln!("{}", polling_station_lookup::NOT_FOUND_MESSAGE);
                std::process::exit(1);
            }
        }

        return;
    }

    let addr = args
        .into_iter()
        .next()
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    println!("Starting polling station lookup service on {}", addr);

    if let Err(e) = polling_station_lookup::serve(&addr, config).await {
        eprintln!("Error running service: {}", e);
        std::process::exit(1);
    }
}
