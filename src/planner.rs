//! The interactive course planner: a numbered text menu over a [`CatalogIndex`].
//!
//! The planner only talks to the catalog through loading, [`CatalogIndex::search`], and
//! [`CatalogIndex::iter`]. It keeps its own record of whether a load ever succeeded, which is
//! what gates the listing and lookup options.
//!
//! Input and output are generic so the whole menu can be driven from memory:
//!
//! ```
//! use std::io::Cursor;
//!
//! use catalog::config::Config;
//! use catalog::planner::Planner;
//!
//! let input = Cursor::new("2\n9\n");
//! let mut planner = Planner::new(input, Vec::new(), Config::default());
//! planner.run().unwrap();
//!
//! let output = String::from_utf8(planner.into_output()).unwrap();
//! assert!(output.contains("Courses not loaded yet."));
//! assert!(output.ends_with("Thank you for using the course planner!\n"));
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::index::CatalogIndex;
use crate::ingest;

const MENU: &str = "
    1. Load Data Structure.
    2. Print Course List.
    3. Print Course.
    9. Exit
";

/// An option of the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: validate a file and load it.
    Load,
    /// `2`: list every course in order.
    PrintCourseList,
    /// `3`: show one course and its prerequisites.
    PrintCourse,
    /// `9`: leave the planner.
    Exit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Load),
            2 => Ok(Self::PrintCourseList),
            3 => Ok(Self::PrintCourse),
            9 => Ok(Self::Exit),
            other => Err(other),
        }
    }
}

/// Runs the course planner menu, reading choices from `R` and writing everything to `W`.
pub struct Planner<R, W> {
    input: R,
    output: W,
    index: CatalogIndex,
    config: Config,
    data_loaded: bool,
}

impl<R: BufRead, W: Write> Planner<R, W> {
    /// Creates a planner with an empty catalog.
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            index: CatalogIndex::new(),
            config,
            data_loaded: false,
        }
    }

    /// The catalog as currently loaded.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Whether any load has succeeded so far.
    pub fn is_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Gives back the writer, for inspecting what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Shows the menu until the user exits or the input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the course planner.")?;

        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "What would you like to do? ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                debug!("input closed; leaving planner");
                return Ok(());
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(number) => MenuChoice::try_from(number),
                Err(_) => {
                    writeln!(self.output, "Input is not a valid option.")?;
                    continue;
                }
            };

            match choice {
                Ok(MenuChoice::Load) => {
                    write!(self.output, "Enter the name of the data file to load: ")?;
                    self.output.flush()?;
                    match self.read_line()? {
                        Some(path) => {
                            self.load(path)?;
                        }
                        None => return Ok(()),
                    }
                }
                Ok(MenuChoice::PrintCourseList) => self.print_course_list()?,
                Ok(MenuChoice::PrintCourse) => {
                    if !self.print_course()? {
                        return Ok(());
                    }
                }
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Thank you for using the course planner!")?;
                    return Ok(());
                }
                Err(number) => writeln!(self.output, "{number} is not a valid option.")?,
            }
        }
    }

    /// Validates and loads the file at `path`, reporting the outcome. Returns whether the load
    /// succeeded. A failed load leaves the previous catalog in place.
    pub fn load(&mut self, path: impl AsRef<Path>) -> io::Result<bool> {
        match ingest::validate_and_load(path, &mut self.index, &self.config) {
            Ok(_) => {
                self.data_loaded = true;
                writeln!(self.output, "Courses loaded successfully.")?;
                Ok(true)
            }
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                writeln!(self.output, "File validation failed.")?;
                Ok(false)
            }
        }
    }

    fn print_course_list(&mut self) -> io::Result<()> {
        if !self.data_loaded {
            return writeln!(self.output, "Courses not loaded yet.");
        }

        writeln!(self.output, "Here is a sample schedule:\n")?;
        for course in &self.index {
            writeln!(self.output, "{course}")?;
        }
        Ok(())
    }

    /// Asks for a course number and prints it. Returns `false` if the input ran out while
    /// asking.
    fn print_course(&mut self) -> io::Result<bool> {
        if !self.data_loaded {
            writeln!(self.output, "Courses not loaded yet.")?;
            return Ok(true);
        }

        write!(self.output, "What course do you want to know about? ")?;
        self.output.flush()?;
        let Some(key) = self.read_line()? else {
            return Ok(false);
        };

        match self.index.search(&key) {
            None => writeln!(self.output, "Course {key} not found.")?,
            Some(course) => {
                writeln!(self.output, "{course}")?;
                if course.prerequisites().is_empty() {
                    writeln!(self.output, "Prerequisites: None")?;
                } else {
                    writeln!(self.output, "Prerequisites: {}", course.prerequisites().join(", "))?;
                }
            }
        }
        Ok(true)
    }

    /// Reads one line without its terminator. `None` at end of input. Bytes that are not valid
    /// UTF-8 become U+FFFD, so they read as an unknown option or course.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(input: &str) -> String {
        let mut planner = Planner::new(Cursor::new(input.to_string()), Vec::new(), Config::default());
        planner.run().unwrap();
        String::from_utf8(planner.into_output()).unwrap()
    }

    #[test]
    fn menu_choices() {
        assert_eq!(MenuChoice::try_from(1), Ok(MenuChoice::Load));
        assert_eq!(MenuChoice::try_from(2), Ok(MenuChoice::PrintCourseList));
        assert_eq!(MenuChoice::try_from(3), Ok(MenuChoice::PrintCourse));
        assert_eq!(MenuChoice::try_from(9), Ok(MenuChoice::Exit));
        assert_eq!(MenuChoice::try_from(4), Err(4));
    }

    #[test]
    fn invalid_input() {
        let output = run("abc\n7\n9\n");
        assert!(output.contains("Input is not a valid option."));
        assert!(output.contains("7 is not a valid option."));
    }

    #[test]
    fn lookup_before_load() {
        let output = run("3\n9\n");
        assert!(output.contains("Courses not loaded yet."));
        assert!(!output.contains("What course do you want to know about?"));
    }

    #[test]
    fn end_of_input_stops() {
        let output = run("");
        assert!(output.starts_with("Welcome to the course planner.\n"));
        assert!(output.ends_with("What would you like to do? "));
    }

    #[test]
    fn missing_file_is_reported() {
        let output = run("1\n/definitely/not/here.csv\n2\n9\n");
        assert!(output.contains("Error: Unable to open file /definitely/not/here.csv"));
        assert!(output.contains("File validation failed."));
        assert!(output.contains("Courses not loaded yet."));
    }

    #[test]
    fn non_utf8_input_is_an_invalid_option() {
        let input = Cursor::new(b"\xff\n3\n9\n".to_vec());
        let mut planner = Planner::new(input, Vec::new(), Config::default());
        planner.run().unwrap();

        let output = String::from_utf8(planner.into_output()).unwrap();
        assert!(output.contains("Input is not a valid option."));
        assert!(output.contains("Courses not loaded yet."));
        assert!(output.ends_with("Thank you for using the course planner!\n"));
    }

    #[test]
    fn read_line_strips_crlf() {
        let mut planner = Planner::new(Cursor::new("cs101\r\nnext"), Vec::new(), Config::default());
        assert_eq!(planner.read_line().unwrap().as_deref(), Some("cs101"));
        assert_eq!(planner.read_line().unwrap().as_deref(), Some("next"));
        assert_eq!(planner.read_line().unwrap(), None);
    }
}
