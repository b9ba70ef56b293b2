/*!
Option specifiers and the compiled [`Matcher`] built from them.

A [`Matcher`] is a single regular expression made by joining one alternative
per [`MatcherSpec`]. Textual specs are turned into anchored patterns following
the usual conventions (`x` is a short flag, `name` is a long flag, a trailing
`=` asks for a value); regex specs are used as given.
*/

use core::fmt;

use regex::{Captures, Regex};

/// The capture group name that carries an option's value.
pub const PARAM_GROUP: &str = "param";

/// Building a [`Matcher`] failed, because one of its specs produced an invalid
/// regular expression.
#[derive(Debug, thiserror::Error)]
#[error("invalid option matcher: {0}")]
pub struct MatcherError(#[from] regex::Error);

/**
A single option specifier.

`Literal` specs follow the textual conventions:

- `"v"`: the short flag `-v`, which may be clustered (`-xv`, `-vx`)
- `"o="`: the short option `-o`, with a value given inline (`-ofile`) or as
  the next argument (`-o file`)
- `"verbose"`: the long flag `--verbose`
- `"output="`: the long option `--output`, with a value given as
  `--output=file` or `--output file`

A value-bearing short option captures *everything* after its letter, so
`-vofile` works with `o=` but `-ovfile` yields `vfile`. Short options that take
a value should come last in a cluster.

`Pattern` specs are matched as-is. A named group called `param` in the
pattern carries the option's value.
*/
#[derive(Debug, Clone)]
pub enum MatcherSpec {
    Literal(String),
    Pattern(Regex),
}

impl MatcherSpec {
    /// True if this spec expects a value (a `Literal` ending with `=`, or a
    /// `Pattern` containing a `param` group)
    #[must_use]
    pub fn is_value_bearing(&self) -> bool {
        match self {
            MatcherSpec::Literal(spec) => spec.ends_with('='),
            MatcherSpec::Pattern(regex) => regex
                .capture_names()
                .flatten()
                .any(|name| name == PARAM_GROUP),
        }
    }

    /// The option name of a `Literal` spec, without any trailing `=`
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            MatcherSpec::Literal(spec) => Some(spec.strip_suffix('=').unwrap_or(spec)),
            MatcherSpec::Pattern(_) => None,
        }
    }

    /// Compare a raw token directly against this spec: exact equality for a
    /// `Literal`, a regex search for a `Pattern`.
    #[must_use]
    pub fn is_match(&self, token: &str) -> bool {
        match self {
            MatcherSpec::Literal(spec) => spec == token,
            MatcherSpec::Pattern(regex) => regex.is_match(token),
        }
    }

    fn option_pattern(&self, param_group: &str) -> String {
        let spec = match self {
            MatcherSpec::Literal(spec) => spec,
            MatcherSpec::Pattern(regex) => {
                return regex
                    .as_str()
                    .replace("(?P<param>", &format!("(?P<{param_group}>"))
                    .replace("(?<param>", &format!("(?<{param_group}>"));
            }
        };

        let name = spec.strip_suffix('=').unwrap_or(spec);

        let mut chars = name.chars();
        match (chars.next(), chars.next(), self.is_value_bearing()) {
            (Some(_), None, false) => format!("^-[^-]*?{}", regex::escape(name)),
            (Some(_), None, true) => {
                format!("^-[^-]*?{}(?<{param_group}>.+)?", regex::escape(name))
            }
            (_, _, false) => format!("^--{}$", regex::escape(name)),
            (_, _, true) => format!("^--{}(?:=(?<{param_group}>.*))?$", regex::escape(name)),
        }
    }
}

impl From<&str> for MatcherSpec {
    fn from(spec: &str) -> Self {
        MatcherSpec::Literal(spec.to_owned())
    }
}

impl From<String> for MatcherSpec {
    fn from(spec: String) -> Self {
        MatcherSpec::Literal(spec)
    }
}

impl From<&String> for MatcherSpec {
    fn from(spec: &String) -> Self {
        MatcherSpec::Literal(spec.clone())
    }
}

impl From<Regex> for MatcherSpec {
    fn from(regex: Regex) -> Self {
        MatcherSpec::Pattern(regex)
    }
}

impl From<&Regex> for MatcherSpec {
    fn from(regex: &Regex) -> Self {
        MatcherSpec::Pattern(regex.clone())
    }
}

#[derive(Debug, Clone, Copy)]
struct Alternative {
    group: usize,
    param: Option<usize>,
    value_bearing: bool,
}

/**
A compiled set of [`MatcherSpec`]s. All of the specs are joined into a single
alternation and matched in one pass; each alternative lives in its own capture
group, so a successful match knows which spec it came from and where that
spec's value was captured.

A [`Matcher`] with no specs never matches anything.
*/
#[derive(Clone)]
pub struct Matcher {
    regex: Option<Regex>,
    alternatives: Vec<Alternative>,
}

impl Matcher {
    pub fn new<I>(specs: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator,
        I::Item: Into<MatcherSpec>,
    {
        let specs: Vec<MatcherSpec> = specs.into_iter().map(Into::into).collect();

        if specs.is_empty() {
            return Ok(Self {
                regex: None,
                alternatives: Vec::new(),
            });
        }

        let pattern = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let param_group = param_group_name(i);
                format!(
                    "(?<{group}>{pattern})",
                    group = alternative_group_name(i),
                    pattern = spec.option_pattern(&param_group),
                )
            })
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::new(&pattern)?;

        let group_index = |name: &str| {
            regex
                .capture_names()
                .position(|group| group == Some(name))
        };

        let alternatives = specs
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| {
                Some(Alternative {
                    group: group_index(&alternative_group_name(i))?,
                    param: group_index(&param_group_name(i)),
                    value_bearing: spec.is_value_bearing(),
                })
            })
            .collect();

        Ok(Self {
            regex: Some(regex),
            alternatives,
        })
    }

    /// The combined pattern, if there were any specs
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Match a raw argument against this matcher.
    #[must_use]
    pub fn captures<'arg>(&self, token: &'arg str) -> Option<OptionMatch<'arg>> {
        let captures = self.regex.as_ref()?.captures(token)?;
        let alternative = *self
            .alternatives
            .iter()
            .find(|alternative| captures.get(alternative.group).is_some())?;

        Some(OptionMatch {
            captures,
            alternative,
        })
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.as_str()).finish()
    }
}

fn alternative_group_name(index: usize) -> String {
    format!("__alt{index}")
}

fn param_group_name(index: usize) -> String {
    format!("__param{index}")
}

/// The result of a successful [`Matcher::captures`].
#[derive(Debug)]
pub struct OptionMatch<'arg> {
    captures: Captures<'arg>,
    alternative: Alternative,
}

impl<'arg> OptionMatch<'arg> {
    /// The matched text
    #[must_use]
    pub fn as_str(&self) -> &'arg str {
        self.captures
            .get(self.alternative.group)
            .map(|m| m.as_str())
            .unwrap_or_default()
    }

    /// True if the spec that matched expects a value
    #[must_use]
    pub fn is_value_bearing(&self) -> bool {
        self.alternative.value_bearing
    }

    /// The inline value, if the matching spec captured one. `-ofile` and
    /// `--output=file` have one; `-o file` and `--output file` don't.
    #[must_use]
    pub fn param(&self) -> Option<&'arg str> {
        self.captures
            .get(self.alternative.param?)
            .map(|m| m.as_str())
    }

    /// Look up any other named group from a `Pattern` spec
    #[must_use]
    pub fn name(&self, name: &str) -> Option<&'arg str> {
        self.captures.name(name).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn param_of(specs: &[&str], token: &str) -> Option<String> {
        let matcher = Matcher::new(specs.iter().copied()).unwrap();
        matcher
            .captures(token)
            .and_then(|m| m.param().map(str::to_owned))
    }

    #[rstest]
    #[case("x", "-x", true)]
    #[case("x", "-axb", true)]
    #[case("x", "-abx", true)]
    #[case("x", "-abc", false)]
    #[case("x", "--x", false)]
    #[case("x", "x", false)]
    #[case("verbose", "--verbose", true)]
    #[case("verbose", "--verbose-mode", false)]
    #[case("verbose", "-verbose", false)]
    #[case("long-x=", "--long-x", true)]
    #[case("long-x=", "--long-x=foo", true)]
    #[case("long-x=", "--long-xfoo", false)]
    #[case("a.b", "--axb", false)]
    fn literal_specs(#[case] spec: &str, #[case] token: &str, #[case] expected: bool) {
        let matcher = Matcher::new([spec]).unwrap();
        assert_eq!(matcher.captures(token).is_some(), expected);
    }

    #[rstest]
    #[case(&["x="], "-xfoo", Some("foo"))]
    #[case(&["x="], "-x", None)]
    #[case(&["x="], "-axfoo", Some("foo"))]
    #[case(&["y="], "-xyz", Some("z"))]
    #[case(&["long-x="], "--long-x=foo", Some("foo"))]
    #[case(&["long-x="], "--long-x=", Some(""))]
    #[case(&["long-x="], "--long-x", None)]
    #[case(&["v", "o="], "-ofile", Some("file"))]
    #[case(&["o=", "output="], "--output=file", Some("file"))]
    fn inline_params(#[case] specs: &[&str], #[case] token: &str, #[case] expected: Option<&str>) {
        assert_eq!(param_of(specs, token).as_deref(), expected);
    }

    #[test]
    fn matched_alternative_decides_value_bearing() {
        let matcher = Matcher::new(["v", "output="]).unwrap();

        let flag = matcher.captures("-v").unwrap();
        assert!(!flag.is_value_bearing());

        let option = matcher.captures("--output").unwrap();
        assert!(option.is_value_bearing());
    }

    #[test]
    fn pattern_param_groups_are_renamed() {
        let first = Regex::new(r"^\+(?<param>\d+)$").unwrap();
        let second = Regex::new(r"^@(?P<param>\w+)$").unwrap();
        let matcher = Matcher::new([MatcherSpec::from(first), MatcherSpec::from(second)]).unwrap();

        let m = matcher.captures("+42").unwrap();
        assert!(m.is_value_bearing());
        assert_eq!(m.param(), Some("42"));

        let m = matcher.captures("@host").unwrap();
        assert_eq!(m.param(), Some("host"));
    }

    #[test]
    fn pattern_keeps_other_named_groups() {
        let regex = Regex::new(r"^-(?<level>\d)$").unwrap();
        let matcher = Matcher::new([regex]).unwrap();
        let m = matcher.captures("-3").unwrap();

        assert!(!m.is_value_bearing());
        assert_eq!(m.param(), None);
        assert_eq!(m.name("level"), Some("3"));
    }

    #[test]
    fn empty_matcher_never_matches() {
        let matcher = Matcher::new(Vec::<MatcherSpec>::new()).unwrap();
        assert!(matcher.captures("-x").is_none());
        assert!(matcher.captures("").is_none());
        assert_eq!(matcher.as_str(), None);
    }

    #[test]
    fn duplicate_named_groups_are_rejected() {
        let a = Regex::new(r"^(?<n>a)$").unwrap();
        let b = Regex::new(r"^(?<n>b)$").unwrap();
        assert!(Matcher::new([a, b]).is_err());
    }

    #[test]
    fn spec_accessors() {
        let spec = MatcherSpec::from("output=");
        assert!(spec.is_value_bearing());
        assert_eq!(spec.name(), Some("output"));
        assert!(spec.is_match("output="));
        assert!(!spec.is_match("--output"));

        let spec = MatcherSpec::from("v");
        assert!(!spec.is_value_bearing());
        assert_eq!(spec.name(), Some("v"));
    }
}
