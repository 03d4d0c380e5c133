//! Line-oriented command parsing.
//!
//! The binder reads one line at a time and turns it into a [`Command`] for the
//! handler. The first word is the verb, the rest of the line is its argument.
//! Arguments naming a catalog option (a location, an organization, a category
//! or a tag) are resolved against the options the catalog currently offers, so
//! `location izmir` selects `İzmir` and `tag genclik` selects `Gençlik`.
//!
//! # Example
//!
//! ```rust
//! use eventscout::app::{command, Command};
//! use eventscout::domain::SortOption;
//! use eventscout::storage::Catalog;
//!
//! let catalog = Catalog::default();
//! let cmd = command::parse("sort volunteers", &catalog)?;
//! assert_eq!(cmd, Command::Sort(SortOption::Volunteers));
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

use super::handler::Command;
use crate::domain::error::{EventScoutError, Result};
use crate::domain::{Category, DateRange, EventId, EventMode, SortOption};
use crate::infrastructure::text::fold_turkish;
use crate::storage::Catalog;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Argument words that select the "all" entry of an option list.
const ALL_WORDS: [&str; 3] = ["all", "any", "hepsi"];

/// Picks one entry out of an option list from what the user typed.
///
/// Resolution order:
/// 1. Case-insensitive exact match after folding Turkish letters to ASCII
/// 2. Best fuzzy match over the folded option labels
pub struct OptionResolver {
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for OptionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionResolver").finish_non_exhaustive()
    }
}

impl Default for OptionResolver {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl OptionResolver {
    /// Resolves `input` to one of `options`.
    ///
    /// Ties in fuzzy score go to the option listed first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventscout::app::command::OptionResolver;
    ///
    /// let options = vec!["İstanbul".to_string(), "İzmir".to_string()];
    /// let resolver = OptionResolver::default();
    /// assert_eq!(resolver.resolve("izmir", &options), Some("İzmir"));
    /// assert_eq!(resolver.resolve("ist", &options), Some("İstanbul"));
    /// assert_eq!(resolver.resolve("xyz", &options), None);
    /// ```
    #[must_use]
    pub fn resolve<'a>(&self, input: &str, options: &'a [String]) -> Option<&'a str> {
        let needle = fold_turkish(input.trim());
        if needle.is_empty() {
            return None;
        }

        if let Some(exact) = options.iter().find(|option| fold_turkish(option) == needle) {
            return Some(exact.as_str());
        }

        let mut best: Option<(i64, &'a str)> = None;
        for option in options {
            let Some(score) = self.matcher.fuzzy_match(&fold_turkish(option), &needle) else {
                continue;
            };
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, option.as_str()));
            }
        }

        tracing::trace!(input = %input, resolved = ?best, "option resolved");
        best.map(|(_, option)| option)
    }
}

/// Parses one input line into a [`Command`].
///
/// An empty line parses to [`Command::Redraw`].
///
/// # Errors
///
/// Returns [`EventScoutError::Command`] for an unknown verb, a missing or
/// malformed argument, or an option that matches nothing in the catalog. The
/// message is meant for the notification line.
pub fn parse(line: &str, catalog: &Catalog) -> Result<Command> {
    let line = line.trim();
    let (verb, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
    let resolver = OptionResolver::default();

    let command = match verb.to_lowercase().as_str() {
        "" => Command::Redraw,
        "search" | "s" | "/" => Command::Search(arg.to_string()),
        "location" | "loc" | "city" => {
            Command::Location(resolve_choice(&resolver, "location", arg, &catalog.location_options())?)
        }
        "org" | "organization" => Command::Organization(resolve_choice(
            &resolver,
            "organization",
            arg,
            &catalog.organization_options(),
        )?),
        "category" | "cat" => {
            let labels: Vec<String> = catalog
                .category_options()
                .into_iter()
                .map(|category| category.label().to_string())
                .collect();
            let label = resolve_required(&resolver, "category", arg, &labels)?;
            Command::Category(label.parse::<Category>().map_err(EventScoutError::Command)?)
        }
        "tag" => Command::Tag(resolve_required(&resolver, "tag", arg, &catalog.tag_options())?.to_string()),
        "date" | "when" => Command::Date(required(arg, "date")?.parse::<DateRange>().map_err(EventScoutError::Command)?),
        "min" | "volunteers" => Command::MinVolunteers(parse_number(required(arg, "min")?, "min")?),
        "mode" => {
            let arg = required(arg, "mode")?;
            if is_all(arg) {
                Command::Mode(None)
            } else {
                Command::Mode(Some(arg.parse::<EventMode>().map_err(EventScoutError::Command)?))
            }
        }
        "sort" => Command::Sort(required(arg, "sort")?.parse::<SortOption>().map_err(EventScoutError::Command)?),
        "reset" | "clear" => Command::Reset,
        "page" => Command::Page(parse_number(required(arg, "page")?, "page")?),
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Prev,
        "show" | "open" => Command::Show(EventId(parse_number(required(arg, "show")?, "event id")?)),
        "back" | "b" => Command::Back,
        "login" => {
            let (identifier, password) = arg
                .split_once(char::is_whitespace)
                .map(|(identifier, password)| (identifier, password.trim()))
                .filter(|(_, password)| !password.is_empty())
                .ok_or_else(|| EventScoutError::Command("usage: login USERNAME|EMAIL PASSWORD".to_string()))?;
            Command::Login {
                identifier: identifier.to_string(),
                password: password.to_string(),
            }
        }
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(EventScoutError::Command(format!("unknown command: {other} (try `help`)"))),
    };

    Ok(command)
}

fn is_all(arg: &str) -> bool {
    ALL_WORDS.contains(&arg.to_lowercase().as_str())
}

fn required<'a>(arg: &'a str, verb: &str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(EventScoutError::Command(format!("`{verb}` needs an argument")))
    } else {
        Ok(arg)
    }
}

fn parse_number<T: std::str::FromStr>(arg: &str, what: &str) -> Result<T> {
    arg.parse::<T>()
        .map_err(|_| EventScoutError::Command(format!("invalid {what}: {arg}")))
}

fn resolve_required<'a>(
    resolver: &OptionResolver,
    what: &str,
    arg: &str,
    options: &'a [String],
) -> Result<&'a str> {
    let arg = required(arg, what)?;
    resolver
        .resolve(arg, options)
        .ok_or_else(|| EventScoutError::Command(format!("no {what} matches \"{arg}\"")))
}

/// Resolves a single-choice filter. The first option is the "all" label and
/// resolves to `None`, as does an empty argument or one of [`ALL_WORDS`].
fn resolve_choice(
    resolver: &OptionResolver,
    what: &str,
    arg: &str,
    options: &[String],
) -> Result<Option<String>> {
    if arg.is_empty() || is_all(arg) {
        return Ok(None);
    }
    let resolved = resolve_required(resolver, what, arg, options)?;
    let is_default = options.first().is_some_and(|first| first == resolved);
    Ok((!is_default).then(|| resolved.to_string()))
}
