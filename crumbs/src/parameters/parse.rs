//! Parsing triggers and configuration file registration.

use std::ffi::OsString;
use std::path::Path;

use clap::Command;
use tracing::debug;

use super::Parameters;
use crate::CrumbsResult;
use crate::sources::{ArgumentSnapshot, EnvironmentSnapshot, build_command};

impl Parameters {
    /// Parse the process arguments and capture the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::CliParsing`](crate::CrumbsError::CliParsing)
    /// when the arguments are invalid or when help or version output was
    /// requested (see [`CrumbsError::is_display_request`](crate::CrumbsError::is_display_request)).
    pub fn parse(&mut self) -> CrumbsResult<()> {
        self.parse_from(std::env::args_os())
    }

    /// Parse `args`, whose first item is the program name, and capture the
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_from<I, T>(&mut self, args: I) -> CrumbsResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.capture(args, false)?;
        self.parsed = true;
        Ok(())
    }

    /// Parse only the arguments registered so far.
    ///
    /// Help flags and unrecognised arguments are ignored, so this can run
    /// before every parameter is declared, for example to read the path of
    /// a configuration file. The store is not marked as parsed.
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::CliParsing`](crate::CrumbsError::CliParsing)
    /// if clap still rejects the filtered arguments.
    pub fn parse_known(&mut self) -> CrumbsResult<()> {
        self.parse_known_from(std::env::args_os())
    }

    /// [`parse_known`](Self::parse_known) over explicit `args`.
    ///
    /// # Errors
    ///
    /// See [`parse_known`](Self::parse_known).
    pub fn parse_known_from<I, T>(&mut self, args: I) -> CrumbsResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.capture(args, true)
    }

    fn capture<I, T>(&mut self, args: I, only_known: bool) -> CrumbsResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        debug!(only_known, "parsing parameters");
        self.arguments = ArgumentSnapshot::parse(&self.settings, &self.entries, args, only_known)?;
        self.environment = EnvironmentSnapshot::capture();
        self.reset();
        Ok(())
    }

    /// The command generated from the current declarations, for rendering
    /// help or usage.
    #[must_use]
    pub fn command(&self) -> Command {
        build_command(&self.settings, &self.entries)
    }

    /// Add a configuration file to the search.
    ///
    /// The file is read immediately. Files that do not exist or cannot be
    /// read are remembered but skipped with a warning, so they are picked up
    /// by a later [`read_configuration_files`](Self::read_configuration_files).
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::File`](crate::CrumbsError::File) when the file
    /// exists but cannot be parsed.
    pub fn add_configuration_file(&mut self, path: impl AsRef<Path>) -> CrumbsResult<()> {
        self.files.add(path.as_ref())?;
        self.reset();
        Ok(())
    }

    /// Re-read every configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CrumbsError::File`](crate::CrumbsError::File) when a file
    /// can no longer be parsed.
    pub fn read_configuration_files(&mut self) -> CrumbsResult<()> {
        self.files.reload()?;
        self.reset();
        Ok(())
    }

    /// Registered configuration files in search order.
    pub fn configuration_files(&self) -> impl Iterator<Item = &Path> {
        self.files.paths()
    }
}
