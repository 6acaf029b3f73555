//! Interactive Swedish menu over any line-based input.

use std::io::{BufRead, Write};

use anyhow::Result;
use crossterm::style::Stylize;

use crate::errors::{parse_id, StoreError};
use crate::models::{Customer, Project};
use crate::repository::Repository;
use crate::services::ProjectService;

const MENU: &[&str] = &[
    "1. Visa alla projekt",
    "2. Skapa nytt projekt",
    "3. Uppdatera projekt",
    "4. Avsluta",
];

/// Shown when a project's customer could not be resolved
pub(crate) const UNKNOWN_CUSTOMER: &str = "Okänd kund";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    List,
    Create,
    Update,
    Exit,
}

impl MenuChoice {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Create),
            "3" => Some(Self::Update),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Shell<C, P, R, W> {
    service: ProjectService<C, P>,
    input: R,
    output: W,
    color: bool,
}

impl<C, P, R, W> Shell<C, P, R, W>
where
    C: Repository<Customer>,
    P: Repository<Project>,
    R: BufRead,
    W: Write,
{
    pub fn new(service: ProjectService<C, P>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            color: false,
        }
    }

    /// Emit ANSI styling; only wanted when the output is a terminal
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run until the user exits or input ends. Storage errors end the loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::List) => self.list_projects().await?,
                Some(MenuChoice::Create) => self.create_project().await?,
                Some(MenuChoice::Update) => self.update_project().await?,
                Some(MenuChoice::Exit) => break,
                None => self.error("Ogiltigt val, försök igen.")?,
            }
        }

        writeln!(self.output, "Hej då!")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        let header = "=== Projekthantering ===";
        if self.color {
            writeln!(self.output, "{}", header.bold())?;
        } else {
            writeln!(self.output, "{}", header)?;
        }
        for entry in MENU {
            writeln!(self.output, "{}", entry)?;
        }
        write!(self.output, "Välj ett alternativ: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Next line without its line ending; `None` at end of input.
    /// Bytes that are not UTF-8 become U+FFFD, so they fail validation like any other bad input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    fn error(&mut self, message: &str) -> Result<()> {
        if self.color {
            writeln!(self.output, "{}", message.red())?;
        } else {
            writeln!(self.output, "{}", message)?;
        }
        Ok(())
    }

    async fn list_projects(&mut self) -> Result<()> {
        let projects = self.service.get_all().await?;

        if projects.is_empty() {
            writeln!(self.output, "Inga projekt hittades.")?;
            return Ok(());
        }

        for project in &projects {
            writeln!(
                self.output,
                "{}: {} (Kund: {})",
                project.id,
                project.name,
                project.customer_name().unwrap_or(UNKNOWN_CUSTOMER)
            )?;
        }
        Ok(())
    }

    async fn create_project(&mut self) -> Result<()> {
        let Some(project_name) = self.prompt("Projektnamn")? else {
            return Ok(());
        };
        let Some(customer_name) = self.prompt("Kundnamn")? else {
            return Ok(());
        };

        if project_name.is_empty() || customer_name.is_empty() {
            return self.error("Namnet får inte vara tomt.");
        }

        let project = self.service.create(&project_name, &customer_name).await?;
        writeln!(
            self.output,
            "Projekt '{}' skapades (ID {}) för kunden '{}'.",
            project.name,
            project.id,
            project.customer_name().unwrap_or(&customer_name)
        )?;
        Ok(())
    }

    async fn update_project(&mut self) -> Result<()> {
        let Some(raw_id) = self.prompt("Projekt-ID")? else {
            return Ok(());
        };

        let id = match parse_id(&raw_id) {
            Ok(id) => id,
            Err(err) => return self.error(&format!("Ogiltigt ID: {}", err.input)),
        };

        let Some(new_name) = self.prompt("Nytt namn")? else {
            return Ok(());
        };
        if new_name.is_empty() {
            return self.error("Namnet får inte vara tomt.");
        }

        match self.service.update(id, &new_name).await {
            Ok(project) => {
                writeln!(self.output, "Projekt {} heter nu '{}'.", project.id, project.name)?;
                Ok(())
            }
            Err(StoreError::NotFound { id, .. }) => self.error(&format!("Inget projekt med ID {} hittades.", id)),
            Err(err) => Err(err.into()),
        }
    }
}
