// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    log::error!("{} has {} syntax errors", filename, errors.len());
                    resource
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Unicode isolation marks show up as boxes in some fonts.
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                log::error!("{} has {} duplicate messages", filename, errors.len());
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    #[must_use]
    pub fn available_locales(&self) -> &[LanguageIdentifier] {
        &self.available_locales
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Switches language. Unknown locales are ignored.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    /// Locale following the current one, wrapping around.
    #[must_use]
    pub fn next_locale(&self) -> LanguageIdentifier {
        let position = self
            .available_locales
            .iter()
            .position(|locale| locale == &self.current_locale)
            .unwrap_or(0);
        self.available_locales
            .get((position + 1) % self.available_locales.len().max(1))
            .cloned()
            .unwrap_or_else(|| self.current_locale.clone())
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let supported = |raw: &str| {
        raw.parse::<LanguageIdentifier>()
            .ok()
            .filter(|lang| available.contains(lang))
    };

    cli_lang
        .as_deref()
        .and_then(supported)
        .or_else(|| config.general.language.as_deref().and_then(supported))
        .or_else(|| sys_locale::get_locale().as_deref().and_then(supported))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "ja".parse().unwrap()]
    }

    #[test]
    fn resolve_locale_prefers_cli() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        let lang = resolve_locale(Some("ja".to_string()), &config, &available());
        assert_eq!(lang, Some("ja".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_uses_config() {
        let mut config = Config::default();
        config.general.language = Some("ja".to_string());
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("ja".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_ignores_unsupported_cli_value() {
        let mut config = Config::default();
        config.general.language = Some("ja".to_string());
        let lang = resolve_locale(Some("xx-YY".to_string()), &config, &available());
        assert_eq!(lang, Some("ja".parse().unwrap()));
    }

    #[test]
    fn bundled_locales_are_loaded() {
        let i18n = I18n::default();
        let names: Vec<String> = i18n
            .available_locales()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(names.contains(&DEFAULT_LOCALE.to_string()));
        assert!(names.contains(&"ja".to_string()));
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::default();
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn window_title_is_translated() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        let i18n = I18n::new(Some("en-US".to_string()), &config);
        assert_eq!(i18n.tr("window-title"), "View Page");
    }

    #[test]
    fn arguments_are_interpolated_without_isolation_marks() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(
            i18n.tr_with_args("orientation-yaw", &[("value", "90.0")]),
            "Yaw: 90.0°"
        );
    }

    #[test]
    fn next_locale_cycles_through_all() {
        let mut i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let start = i18n.current_locale().clone();
        for _ in 0..i18n.available_locales().len() {
            let next = i18n.next_locale();
            i18n.set_locale(next);
        }
        assert_eq!(i18n.current_locale(), &start);
    }

    #[test]
    fn set_locale_ignores_unknown() {
        let mut i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        i18n.set_locale("xx".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "en-US");
    }

    #[test]
    fn every_ui_key_is_translated_in_every_locale() {
        const KEYS: &[&str] = &[
            "window-title",
            "header-layers",
            "menu-reload",
            "theme-mode-light",
            "theme-mode-dark",
            "theme-mode-system",
            "layer-grid-empty",
            "sidebar-title",
            "sidebar-empty",
            "sidebar-edit",
            "controls-show-sidebar",
            "controls-hide-sidebar",
            "controls-layer-grid",
            "panorama-loading",
            "panorama-unavailable",
            "modal-layer-title",
            "modal-marker-title",
            "editor-name",
            "editor-description",
            "editor-image-url",
            "editor-save",
            "editor-cancel",
            "editor-error-name-required",
            "editor-error-image-url",
            "editor-missing",
            "notification-io-error",
            "notification-config-load-error",
            "notification-engine-error",
            "notification-panorama-load-error",
            "notification-catalog-not-found",
            "notification-catalog-status",
            "notification-catalog-malformed",
            "notification-catalog-network",
        ];

        let mut i18n = I18n::default();
        for locale in i18n.available_locales().to_vec() {
            i18n.set_locale(locale.clone());
            for key in KEYS {
                assert!(
                    !i18n.tr(key).starts_with("MISSING:"),
                    "{key} missing in {locale}"
                );
            }
        }
    }

    #[test]
    fn keys_with_arguments_are_translated() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(
            i18n.tr_with_args("layer-tile-spheres", &[("count", "2")]),
            "Spheres: 2"
        );
        assert_eq!(
            i18n.tr_with_args("menu-theme", &[("mode", "Dark")]),
            "Theme: Dark"
        );
        let placement = i18n.tr_with_args(
            "marker-placement",
            &[("sphere", "Lobby"), ("yaw", "10.0"), ("pitch", "-5.0")],
        );
        assert!(placement.contains("Lobby"));
    }
}
