// ==========================================
// Internacionalização (i18n)
// ==========================================
// Biblioteca rust-i18n
// Português brasileiro (padrão) e inglês
// ==========================================
// Nota: a macro rust_i18n::i18n! é inicializada no lib.rs
// ==========================================

/// Idioma atual
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Define o idioma ("pt-BR" ou "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Traduz uma mensagem (sem parâmetros)
///
/// # Exemplo
/// ```no_run
/// use cronograma_engine::i18n::t;
/// let msg = t("cronograma.tempo_insuficiente");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}
