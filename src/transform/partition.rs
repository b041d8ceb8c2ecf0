//! Splitting the raw command line into our positionals and `git clone` options

/// `git clone` options that take their value as the following token.
const VALUE_OPTIONS: &[&str] = &[
    "-b",
    "-c",
    "-j",
    "-o",
    "-u",
    "--branch",
    "--bundle-uri",
    "--config",
    "--depth",
    "--filter",
    "--jobs",
    "--origin",
    "--ref-format",
    "--reference",
    "--reference-if-able",
    "--revision",
    "--separate-git-dir",
    "--server-option",
    "--shallow-exclude",
    "--shallow-since",
    "--template",
    "--upload-pack",
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Repository location and optional destination, in input order.
    pub ours: Vec<String>,
    /// Tokens forwarded verbatim to `git clone`, in input order.
    pub pass_through: Vec<String>,
}

/// Bucket `args` into our positionals and pass-through options.
///
/// Any token starting with `-` is an option. A known value-taking option
/// written without `=` also claims the next token. A bare `--` ends option
/// scanning; it is forwarded so `git` sees the same boundary, and every
/// token after it is ours. No token is reclassified once bucketed.
pub fn partition<S: AsRef<str>>(args: &[S]) -> Partition {
    let mut result = Partition::default();
    let mut tokens = args.iter().map(AsRef::as_ref);

    while let Some(token) = tokens.next() {
        if token == "--" {
            result.ours.extend(tokens.by_ref().map(str::to_string));
            result.pass_through.push(token.to_string());
            break;
        }

        if !token.starts_with('-') {
            result.ours.push(token.to_string());
            continue;
        }

        result.pass_through.push(token.to_string());
        if VALUE_OPTIONS.contains(&token) {
            if let Some(value) = tokens.next() {
                result.pass_through.push(value.to_string());
            }
        }
    }

    result
}
