use axum::{routing::get, Router};
use covidchart::config::Config;
use tokio::net::TcpListener;

pub const CASES_CSV: &str = "\
Date,Country,Confirmed,Recovered,Deaths
2020-01-22,Afghanistan,0,0,0
2020-01-22,France,0,0,0
2020-01-22,Germany,0,0,0
2020-01-22,\"Korea, South\",1,0,0
2020-01-22,US,1,0,0
2020-01-22,United Kingdom,0,0,0
2020-01-23,Afghanistan,0,0,0
2020-01-23,France,0,0,0
2020-01-23,Germany,0,0,0
2020-01-23,\"Korea, South\",1,0,0
2020-01-23,US,1,0,0
2020-01-23,United Kingdom,0,0,0
2020-01-24,France,2,0,0
2020-01-24,Germany,0,0,0
2020-01-24,\"Korea, South\",2,0,0
2020-01-24,US,2,0,0
2020-01-24,United Kingdom,0,0,0
";

pub const POPULATION_CSV: &str = "\
Country,Country_Code,Year_2015,Year_2016
Afghanistan,AFG,32526562.0,34656032.0
France,FRA,66624068.0,66896109.0
Germany,DEU,81686611.0,82667685.0
\"Korea, Rep.\",KOR,51014947.0,51245707.0
United Kingdom,GBR,65138232.0,65637239.0
United States,USA,321418820.0,323127513.0
";

pub const MALFORMED_CASES_CSV: &str = "\
Date,Country,Confirmed
2020-01-22,Germany,not-a-number
";

pub const POPULATION_WITHOUT_FRANCE_CSV: &str = "\
Country,Country_Code,Year_2015,Year_2016
Germany,DEU,81686611.0,82667685.0
\"Korea, Rep.\",KOR,51014947.0,51245707.0
United Kingdom,GBR,65138232.0,65637239.0
United States,USA,321418820.0,323127513.0
";

/// Serves the fixture tables on an ephemeral local port and returns its base URL.
pub async fn serve_fixtures() -> String {
    let app = Router::new()
        .route("/cases.csv", get(|| async { CASES_CSV }))
        .route("/population.csv", get(|| async { POPULATION_CSV }))
        .route("/malformed-cases.csv", get(|| async { MALFORMED_CASES_CSV }))
        .route(
            "/population-without-france.csv",
            get(|| async { POPULATION_WITHOUT_FRANCE_CSV }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn config_for(base_url: &str, population_path: &str) -> Config {
    Config {
        cases_url: format!("{}/cases.csv", base_url),
        population_url: format!("{}/{}", base_url, population_path),
        fetch_timeout_secs: 5,
        ..Config::default()
    }
}
