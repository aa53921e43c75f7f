//! Embedded minijinja templates for the generated artifacts.

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, Value};

use crate::domain::AppError;

static TEMPLATES_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/artifacts");

/// Escape text content for the sandbox descriptor.
fn xml_escape(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Build the template environment with every embedded template registered.
pub fn build_template_environment() -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    // Batch files and XML are escaped explicitly, never by file extension.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("xml", xml_escape);

    register_dir(&mut env, &TEMPLATES_DIR)?;
    Ok(env)
}

fn register_dir(env: &mut Environment<'static>, dir: &'static Dir<'static>) -> Result<(), AppError> {
    for file in dir.files() {
        let name = file.path().to_str().ok_or_else(|| {
            AppError::Internal(format!("Template path is not UTF-8: {}", file.path().display()))
        })?;
        let source = file
            .contents_utf8()
            .ok_or_else(|| AppError::Internal(format!("Template '{}' is not UTF-8", name)))?;
        env.add_template(name, source).map_err(|e| {
            AppError::Internal(format!("Failed to register template '{}': {}", name, e))
        })?;
    }
    for sub in dir.dirs() {
        register_dir(env, sub)?;
    }
    Ok(())
}

pub fn render_template_by_name(
    env: &Environment<'_>,
    template_name: &str,
    ctx: &Value,
) -> Result<String, AppError> {
    let template = env.get_template(template_name).map_err(|e| {
        AppError::Internal(format!("Failed to load template '{}': {}", template_name, e))
    })?;

    template.render(ctx).map_err(|e| {
        AppError::Internal(format!("Failed to render template '{}': {}", template_name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifacts::InstallerArchetype;
    use minijinja::context;

    #[test]
    fn every_archetype_has_a_template() {
        let env = build_template_environment().unwrap();
        for archetype in InstallerArchetype::ALL {
            let rendered = render_template_by_name(
                &env,
                archetype.template_name(),
                &context! { file => "installer.exe" },
            )
            .unwrap();
            assert!(!rendered.trim().is_empty(), "{:?} rendered empty", archetype);
        }
    }

    #[test]
    fn xml_filter_escapes_markup() {
        assert_eq!(xml_escape("C:\\a & <b>".into()), "C:\\a &amp; &lt;b&gt;");
    }

    #[test]
    fn missing_template_is_internal_error() {
        let env = build_template_environment().unwrap();
        let err = render_template_by_name(&env, "nope.j2", &context! {}).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
