use std::{
    fs::File,
    io::{self, BufWriter, Read as _, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use oxifour_engine::Board;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a board in text form (top row first, `.`/`R`/`Y` cells).
///
/// A path of `-` reads from stdin.
pub fn read_board_file<P>(path: P) -> anyhow::Result<Board>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read board from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .with_context(|| format!("Failed to read board file: {}", path.display()))?;
    }
    text.parse()
        .with_context(|| format!("Failed to parse board file: {}", path.display()))
}

/// Renders `board` followed by a line of column numbers.
pub fn render_board(board: &Board) -> String {
    let labels: String = (0..board.cols()).map(|col| (col % 10).to_string()).collect();
    format!("{board}\n{labels}")
}

#[cfg(test)]
mod tests {
    use std::env;

    use oxifour_engine::Player;

    use super::*;

    #[test]
    fn test_render_board() {
        let mut board = Board::new(2, 12).unwrap();
        board.drop_piece(11, Player::Red).unwrap();
        assert_eq!(
            render_board(&board),
            "............\n...........R\n012345678901"
        );
    }

    #[test]
    fn test_read_board_file() {
        let path = env::temp_dir().join(format!("oxifour-board-{}.txt", std::process::id()));
        std::fs::write(&path, ".......\n...Y...\n..RR...\n").unwrap();
        let board = read_board_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.piece_count(), 3);

        let missing = read_board_file(env::temp_dir().join("oxifour-missing-board.txt"));
        assert!(missing.is_err());
    }
}
