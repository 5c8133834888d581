//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# testflows configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[webhook]
# url = ""                        # empty = ask for the webhook on startup
# session_header = "X-Session-Id"
# init_message = "TEST_FLOW"      # sent once per session to announce it

[messages]
# error_text = "Lo siento, ha ocurrido un error al procesar tu mensaje."
# fallback_text = "Error al obtener respuesta"
# empty_prompt = "Escribe tu primer mensaje..."

[logging]
# level = "INFO"                  # DEBUG, INFO, WARNING, ERROR
"##
}
