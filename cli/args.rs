//! The `Args` module helps giving command line options to plumb

use structopt::StructOpt;

use std::path::{Path, PathBuf};

#[derive(StructOpt)]
#[structopt(
    name = "plumb",
    about = "Generate dependency injection code from provider declarations"
)]
pub struct Args {
    /// Log what the solver and the code generator are doing
    #[structopt(short, long)]
    debug: bool,

    /// Run the generated code through gofmt
    #[structopt(long)]
    gofmt: bool,

    /// Print the generated code instead of writing it to a file
    #[structopt(long)]
    stdout: bool,

    /// Where to write the generated code. Defaults to `plumb_gen.go` next to the input
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Args {
    /// Parses the command line arguments. Stopping options such as --help or --version
    /// exit the process
    pub fn handle() -> Args {
        Args::from_args()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn gofmt(&self) -> bool {
        self.gofmt
    }

    pub fn stdout(&self) -> bool {
        self.stdout
    }

    /// Declaration file to generate from
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// File the generated code goes to
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_file_name("plumb_gen.go"))
    }
}
