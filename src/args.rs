use clap::Parser;

/// This program aggregates presidential election results by state and by region,
/// and produces the data behind a winner-by-state map.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the dataset: the vote files, the
    /// candidates to exclude and the output settings. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) A single vote file. Setting this option overrides the files
    /// listed in the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv, json or xlsx) The type of the --input file. By default, it is guessed from the
    /// extension of the file, and csv is assumed otherwise.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (state code, optional) The state of all the rows of the --input file, when the file
    /// does not have a state column.
    #[clap(long, value_parser)]
    pub state: Option<String>,

    /// (single character, optional) The field delimiter of the --input file when it is a CSV
    /// file. The raw files of the electoral court use ';'. Defaults to ','.
    #[clap(long, value_parser)]
    pub csv_delimiter: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (state code, repeatable) The states for which the detail views (ranking, regional
    /// distribution, evolution, totals) are added to the summary.
    #[clap(short, long, value_parser)]
    pub select: Vec<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format
    /// to the given location. Setting this option overrides the output directory that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A GeoJSON document with the boundaries of the states, identified by
    /// their SIGLA property.
    #[clap(short, long, value_parser)]
    pub boundaries: Option<String>,

    /// (file path or 'stdout') Where to write the boundaries annotated with the leader and the fill
    /// color of each round.
    #[clap(long, value_parser)]
    pub map_out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, geovotes will
    /// check that the produced summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, a malformed row stops the program instead of being skipped.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
