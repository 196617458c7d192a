use clap::Parser;

/// Computes the dashboard and speaker views of a networking group from its shared spreadsheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the spreadsheet id, the provider and the sheet names.
    /// Options given on the command line take precedence over it.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// The id of the shared spreadsheet to read through its CSV export.
    #[clap(long, value_parser)]
    pub sheet_id: Option<String>,

    /// (directory) Reads each sheet from <dir>/<sheet name>.csv instead of the network.
    #[clap(long, value_parser)]
    pub input_dir: Option<String>,

    /// (file path) Reads each sheet from the worksheet of the same name in an .xlsx file.
    #[clap(long, value_parser)]
    pub workbook: Option<String>,

    /// (YYYY-MM-DD, default today) The day the views are computed for.
    #[clap(long, value_parser)]
    pub today: Option<String>,

    /// (default 1) The position of the speaker to show in the roster. Wraps around.
    #[clap(long, value_parser, default_value_t = 1)]
    pub speaker: usize,

    /// (file path, 'stdout' or empty) Where to write the summary in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, the computed summary
    /// must match it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
