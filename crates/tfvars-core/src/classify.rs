//! File name classification

/// Value files Terraform loads automatically, in load order.
pub const DEFAULT_VALUE_FILES: [&str; 2] = ["terraform.tfvars", "terraform.tfvars.json"];

const AUTO_SUFFIXES: [&str; 2] = [".auto.tfvars", ".auto.tfvars.json"];
const DECLARATION_SUFFIXES: [&str; 2] = [".tf", ".tf.json"];

/// What role a file name plays in variable loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `*.tf` or `*.tf.json`
    Declaration,
    /// `terraform.tfvars` or `terraform.tfvars.json`
    DefaultValues,
    /// `*.auto.tfvars` or `*.auto.tfvars.json`
    Auto,
    Other,
}

impl FileKind {
    pub fn of(name: &str) -> Self {
        if AUTO_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            Self::Auto
        } else if DEFAULT_VALUE_FILES.contains(&name) {
            Self::DefaultValues
        } else if DECLARATION_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
        {
            Self::Declaration
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("main.tf", FileKind::Declaration)]
    #[case("main.tf.json", FileKind::Declaration)]
    #[case("terraform.tfvars", FileKind::DefaultValues)]
    #[case("terraform.tfvars.json", FileKind::DefaultValues)]
    #[case("a.auto.tfvars", FileKind::Auto)]
    #[case("a.auto.tfvars.json", FileKind::Auto)]
    #[case("custom.tfvars", FileKind::Other)]
    #[case("main.tf.py", FileKind::Other)]
    #[case("terraform.tfvars.py", FileKind::Other)]
    #[case("README.md", FileKind::Other)]
    fn classifies(#[case] name: &str, #[case] expected: FileKind) {
        assert_eq!(FileKind::of(name), expected);
    }
}
