use clap::Args;
use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    str::FromStr,
};
use tokio::io::{AsyncBufRead, BufReader, stdin};

/// Where a batch is read from and where its report goes.
#[derive(Args, Debug)]
pub struct IOArgs {
    /// The deal file to import ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// The file receiving the JSON report ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    /// Construct from explicit paths, `None` standing for the standard streams
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Open the input for buffered, asynchronous reading
    pub async fn read(&self) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
        match &self.input {
            PathOrStd::Path(path) => Ok(Box::new(BufReader::new(
                tokio::fs::File::open(path).await?,
            ))),
            PathOrStd::Std => Ok(Box::new(BufReader::new(stdin()))),
        }
    }

    /// Open the output for writing
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

impl Display for IOArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}

#[derive(Clone, Debug)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

impl From<Option<PathBuf>> for PathOrStd {
    fn from(value: Option<PathBuf>) -> Self {
        value.map_or(Self::Std, Self::Path)
    }
}

impl Display for PathOrStd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Std => f.write_str("-"),
        }
    }
}
