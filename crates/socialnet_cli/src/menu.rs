//! Interactive text menu over a `SocialService`.
//!
//! # Invariants
//! - Every failure is reported to the user and the loop keeps running.
//! - `Q` or end of input ends the session without error.

use log::info;
use socialnet_core::{SocialService, Store};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const MENU_TEXT: &str = "
A: Load user database
B: Load status database
C: Add user
D: Update user
E: Search user
F: Delete user
G: Save user database to file
H: Add status
I: Update status
J: Search status
K: Delete status
L: Save status database to file
Q: Quit

Please enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    LoadUsers,
    LoadStatuses,
    AddUser,
    UpdateUser,
    SearchUser,
    DeleteUser,
    SaveUsers,
    AddStatus,
    UpdateStatus,
    SearchStatus,
    DeleteStatus,
    SaveStatuses,
    Quit,
}

impl Action {
    fn parse(selection: &str) -> Option<Self> {
        let action = match selection.trim().to_ascii_uppercase().as_str() {
            "A" => Self::LoadUsers,
            "B" => Self::LoadStatuses,
            "C" => Self::AddUser,
            "D" => Self::UpdateUser,
            "E" => Self::SearchUser,
            "F" => Self::DeleteUser,
            "G" => Self::SaveUsers,
            "H" => Self::AddStatus,
            "I" => Self::UpdateStatus,
            "J" => Self::SearchStatus,
            "K" => Self::DeleteStatus,
            "L" => Self::SaveStatuses,
            "Q" => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Prompt-driven session bound to one service, one reader and one writer.
pub struct Menu<'a, S: Store, R: BufRead, W: Write> {
    service: &'a mut SocialService<S>,
    input: R,
    output: W,
}

impl<'a, S: Store, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(service: &'a mut SocialService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(selection) = self.prompt(MENU_TEXT)? else {
                return Ok(());
            };
            let Some(action) = Action::parse(&selection) else {
                writeln!(self.output, "Invalid option")?;
                continue;
            };
            if !self.dispatch(action)? {
                return Ok(());
            }
        }
    }

    /// Returns `false` when the session should end (quit, or input ended
    /// mid-action).
    fn dispatch(&mut self, action: Action) -> io::Result<bool> {
        info!("event=menu_action module=cli action={action:?}");
        match action {
            Action::LoadUsers => self.load_users(),
            Action::LoadStatuses => self.load_statuses(),
            Action::AddUser => self.add_user(),
            Action::UpdateUser => self.update_user(),
            Action::SearchUser => self.search_user(),
            Action::DeleteUser => self.delete_user(),
            Action::SaveUsers => self.save_users(),
            Action::AddStatus => self.add_status(),
            Action::UpdateStatus => self.update_status(),
            Action::SearchStatus => self.search_status(),
            Action::DeleteStatus => self.delete_status(),
            Action::SaveStatuses => self.save_statuses(),
            Action::Quit => {
                info!("event=menu_quit module=cli status=ok");
                Ok(false)
            }
        }
    }

    fn load_users(&mut self) -> io::Result<bool> {
        let Some(path) = self.prompt("Enter filename of user file: ")? else {
            return Ok(false);
        };
        match self.service.load_users(path.trim()) {
            Ok(report) => writeln!(
                self.output,
                "Loaded {} users ({} skipped)",
                report.inserted, report.skipped
            )?,
            Err(err) => self.report_error("load user file", err)?,
        }
        Ok(true)
    }

    fn load_statuses(&mut self) -> io::Result<bool> {
        let Some(path) = self.prompt("Enter filename for status file: ")? else {
            return Ok(false);
        };
        match self.service.load_statuses(path.trim()) {
            Ok(report) => writeln!(
                self.output,
                "Loaded {} statuses ({} skipped)",
                report.inserted, report.skipped
            )?,
            Err(err) => self.report_error("load status file", err)?,
        }
        Ok(true)
    }

    fn add_user(&mut self) -> io::Result<bool> {
        let Some([user_id, email, first, last]) = self.prompt_user_fields()? else {
            return Ok(false);
        };
        let outcome = self.service.add_user(&user_id, &email, &first, &last);
        self.report_outcome(
            outcome,
            "User was successfully added",
            "add new user",
        )?;
        Ok(true)
    }

    fn update_user(&mut self) -> io::Result<bool> {
        let Some([user_id, email, first, last]) = self.prompt_user_fields()? else {
            return Ok(false);
        };
        let outcome = self.service.update_user(&user_id, &email, &first, &last);
        self.report_outcome(outcome, "User was successfully updated", "update user")?;
        Ok(true)
    }

    fn search_user(&mut self) -> io::Result<bool> {
        let Some(user_id) = self.prompt("Enter user ID to search: ")? else {
            return Ok(false);
        };
        match self.service.search_user(&user_id) {
            Ok(Some(user)) => {
                writeln!(self.output, "User ID: {}", user.user_id)?;
                writeln!(self.output, "Email: {}", user.email)?;
                writeln!(self.output, "Name: {}", user.first_name)?;
                writeln!(self.output, "Last name: {}", user.last_name)?;
            }
            Ok(None) => writeln!(self.output, "ERROR: User does not exist")?,
            Err(err) => self.report_error("search user", err)?,
        }
        Ok(true)
    }

    fn delete_user(&mut self) -> io::Result<bool> {
        let Some(user_id) = self.prompt("User ID: ")? else {
            return Ok(false);
        };
        let outcome = self.service.delete_user(&user_id);
        self.report_outcome(outcome, "User was successfully deleted", "delete user")?;
        Ok(true)
    }

    fn save_users(&mut self) -> io::Result<bool> {
        let Some(path) = self.prompt("Enter filename for users file: ")? else {
            return Ok(false);
        };
        match self.service.save_users(path.trim()) {
            Ok(rows) => writeln!(self.output, "Saved {rows} users")?,
            Err(err) => self.report_error("save user file", err)?,
        }
        Ok(true)
    }

    fn add_status(&mut self) -> io::Result<bool> {
        let Some([user_id, status_id, text]) = self.prompt_status_fields()? else {
            return Ok(false);
        };
        let outcome = self.service.add_status(&status_id, &user_id, &text);
        self.report_outcome(
            outcome,
            "New status was successfully added",
            "add new status",
        )?;
        Ok(true)
    }

    fn update_status(&mut self) -> io::Result<bool> {
        let Some([user_id, status_id, text]) = self.prompt_status_fields()? else {
            return Ok(false);
        };
        let outcome = self.service.update_status(&status_id, &user_id, &text);
        self.report_outcome(outcome, "Status was successfully updated", "update status")?;
        Ok(true)
    }

    fn search_status(&mut self) -> io::Result<bool> {
        let Some(status_id) = self.prompt("Enter status ID to search: ")? else {
            return Ok(false);
        };
        match self.service.search_status(&status_id) {
            Ok(Some(status)) => {
                writeln!(self.output, "User ID: {}", status.user_id)?;
                writeln!(self.output, "Status ID: {}", status.status_id)?;
                writeln!(self.output, "Status text: {}", status.status_text)?;
            }
            Ok(None) => writeln!(self.output, "ERROR: Status does not exist")?,
            Err(err) => self.report_error("search status", err)?,
        }
        Ok(true)
    }

    fn delete_status(&mut self) -> io::Result<bool> {
        let Some(status_id) = self.prompt("Status ID: ")? else {
            return Ok(false);
        };
        let outcome = self.service.delete_status(&status_id);
        self.report_outcome(outcome, "Status was successfully deleted", "delete status")?;
        Ok(true)
    }

    fn save_statuses(&mut self) -> io::Result<bool> {
        let Some(path) = self.prompt("Enter filename for status file: ")? else {
            return Ok(false);
        };
        match self.service.save_statuses(path.trim()) {
            Ok(rows) => writeln!(self.output, "Saved {rows} statuses")?,
            Err(err) => self.report_error("save status file", err)?,
        }
        Ok(true)
    }

    fn prompt_user_fields(&mut self) -> io::Result<Option<[String; 4]>> {
        let labels = ["User ID: ", "User email: ", "User name: ", "User last name: "];
        let mut values: [String; 4] = Default::default();
        for (slot, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(value) => *slot = value,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn prompt_status_fields(&mut self) -> io::Result<Option<[String; 3]>> {
        let labels = ["User ID: ", "Status ID: ", "Status text: "];
        let mut values: [String; 3] = Default::default();
        for (slot, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(value) => *slot = value,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Prints `label` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn report_outcome<E: Display>(
        &mut self,
        outcome: Result<bool, E>,
        success: &str,
        action: &str,
    ) -> io::Result<()> {
        match outcome {
            Ok(true) => writeln!(self.output, "{success}"),
            Ok(false) => writeln!(
                self.output,
                "An error occurred while trying to {action}"
            ),
            Err(err) => self.report_error(action, err),
        }
    }

    fn report_error(&mut self, action: &str, err: impl Display) -> io::Result<()> {
        writeln!(
            self.output,
            "An error occurred while trying to {action}: {err}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Menu};
    use socialnet_core::{MemoryStore, SocialService};
    use std::io::Cursor;

    fn run_script(service: &mut SocialService<MemoryStore>, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(service, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn selection_is_trimmed_and_case_insensitive() {
        assert_eq!(Action::parse(" c "), Some(Action::AddUser));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("Z"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn add_then_search_user() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(
            &mut service,
            "C\nu1\na@x.com\nAnn\nLee\nE\nu1\nQ\n",
        );

        assert!(output.contains("User was successfully added"));
        assert!(output.contains("Email: a@x.com"));
        assert!(output.contains("Last name: Lee"));
    }

    #[test]
    fn duplicate_and_missing_records_report_failures() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(
            &mut service,
            "c\nu1\na@x.com\nAnn\nLee\nc\nu1\nb@y.com\nBea\nNg\nf\nu9\nj\ns1\nq\n",
        );

        assert!(output.contains("An error occurred while trying to add new user\n"));
        assert!(output.contains("An error occurred while trying to delete user\n"));
        assert!(output.contains("ERROR: Status does not exist"));
        assert_eq!(
            service.search_user("u1").unwrap().unwrap().email,
            "a@x.com"
        );
    }

    #[test]
    fn validation_error_is_printed_and_loop_continues() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(
            &mut service,
            "C\nu1\nbad-email\nAnn\nLee\nX\nQ\n",
        );

        assert!(output.contains("invalid email address `bad-email`"));
        assert!(output.contains("Invalid option"));
    }

    #[test]
    fn status_flow_and_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("users.csv");
        let statuses = dir.path().join("statuses.csv");
        let script = format!(
            "C\nu1\na@x.com\nAnn\nLee\nH\nu1\ns1\nhello\nI\nu1\ns1\nhello again\nG\n{}\nL\n{}\nQ\n",
            users.display(),
            statuses.display()
        );

        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(&mut service, &script);
        assert!(output.contains("New status was successfully added"));
        assert!(output.contains("Status was successfully updated"));
        assert!(output.contains("Saved 1 users"));
        assert!(output.contains("Saved 1 statuses"));

        let mut fresh = SocialService::new(MemoryStore::new());
        let reload = format!(
            "A\n{}\nB\n{}\nJ\ns1\nK\ns1\nQ\n",
            users.display(),
            statuses.display()
        );
        let output = run_script(&mut fresh, &reload);
        assert!(output.contains("Loaded 1 users (0 skipped)"));
        assert!(output.contains("Loaded 1 statuses (0 skipped)"));
        assert!(output.contains("Status text: hello again"));
        assert!(output.contains("Status was successfully deleted"));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(&mut service, "A\n/nonexistent/dir/users.csv\nQ\n");
        assert!(output.contains("An error occurred while trying to load user file"));
    }

    #[test]
    fn quit_ignores_remaining_input() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(&mut service, "q\nC\nu1\na@x.com\nAnn\nLee\n");

        assert!(output.ends_with("Please enter your choice: "));
        assert!(service.search_user("u1").unwrap().is_none());
    }

    #[test]
    fn end_of_input_mid_action_ends_session() {
        let mut service = SocialService::new(MemoryStore::new());
        let output = run_script(&mut service, "C\nu1\n");
        assert!(output.ends_with("User email: "));
        assert!(service.search_user("u1").unwrap().is_none());
    }
}
