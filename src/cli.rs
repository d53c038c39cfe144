use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "covidchart",
    about = "HTTP server that charts COVID-19 cases per capita for a fixed set of countries",
    version
)]
pub struct Args {
    /// Print the chart JSON to stdout and exit instead of serving
    #[arg(long)]
    pub dump: bool,

    /// Print the per-capita table as JSON and exit
    #[arg(long, conflicts_with = "dump")]
    pub dump_table: bool,

    /// Overrides SERVER_PORT
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    pub fn is_server_mode(&self) -> bool {
        !self.dump && !self.dump_table
    }
}
