// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// Catálogo de mensagens voltadas ao usuário, por idioma.
// Chaves ausentes caem para o inglês e, em último caso, para a própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

const PT: &[(&str, &str)] = &[
    ("validation.failed", "Um ou mais campos são inválidos."),
    ("auth.email_in_use", "Este e-mail já está em uso."),
    ("auth.invalid_email", "O e-mail fornecido é inválido."),
    ("auth.weak_password", "A senha deve ter no mínimo 6 caracteres."),
    ("auth.invalid_credentials", "E-mail ou senha inválidos."),
    ("auth.invalid_token", "Token de autenticação inválido ou ausente."),
    ("auth.session_expired", "Sua sessão expirou. Faça login novamente."),
    ("auth.login_required", "Faça login para continuar."),
    ("auth.forbidden", "Você não tem permissão para acessar esta área."),
    ("auth.session_loading", "Carregando a sessão. Tente novamente em instantes."),
    ("users.not_found", "Usuário não encontrado."),
    ("resource.not_found", "Registro não encontrado."),
    ("technicians.empty", "Nenhum técnico cadastrado para distribuir a meta."),
    ("technicians.invalid_goal", "A meta deve ser um valor positivo."),
    ("checklists.missing_file", "Selecione um arquivo PDF para o checklist."),
    ("checklists.invalid_form", "Formulário de envio inválido."),
    ("dashboard.invalid_period", "Período de filtro inválido."),
    ("internal.unexpected", "Não foi possível concluir a operação. Tente novamente."),
];

const EN: &[(&str, &str)] = &[
    ("validation.failed", "One or more fields are invalid."),
    ("auth.email_in_use", "This e-mail is already in use."),
    ("auth.invalid_email", "The e-mail address is invalid."),
    ("auth.weak_password", "The password must have at least 6 characters."),
    ("auth.invalid_credentials", "Invalid e-mail or password."),
    ("auth.invalid_token", "Invalid or missing authentication token."),
    ("auth.session_expired", "Your session has expired. Please sign in again."),
    ("auth.login_required", "Please sign in to continue."),
    ("auth.forbidden", "You are not allowed to access this area."),
    ("auth.session_loading", "Loading your session. Please try again shortly."),
    ("users.not_found", "User not found."),
    ("resource.not_found", "Record not found."),
    ("technicians.empty", "There are no technicians to distribute the goal to."),
    ("technicians.invalid_goal", "The goal must be a positive value."),
    ("checklists.missing_file", "Select a PDF file for the checklist."),
    ("checklists.invalid_form", "Invalid upload form."),
    ("dashboard.invalid_period", "Invalid filter period."),
    ("internal.unexpected", "Could not complete the operation. Please try again."),
];

impl Default for I18nStore {
    fn default() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages }
    }
}

impl I18nStore {
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
