//! Prompt construction for filter extraction.

/// Instruction block sent ahead of every query.
///
/// Lists every [`FilterSet`](super::types::FilterSet) field and forces a bare,
/// lower-cased JSON reply with `null` for anything not mentioned. The response
/// parser relies on these rules.
pub const DEFAULT_INSTRUCTIONS: &str = r#"
Analiza el siguiente query de búsqueda inmobiliaria y extrae estos parámetros:
    - price (number)
    - zone (array of strings) # achumani, centro, sopocachi. Autocorregir si es necesario.
    - city (array of strings) # la paz, cochabamba, santa cruz, oruro, potosi, tarija, pando, beni, chuquisaca. Autocorregir si es necesario.
    - people_capacity (number)
    - garden (booleano)
    - garage (booleano)
    - property_type (string) # casa, departamento, oficina, terreno, local
    - operation_type (string) # venta, alquiler, anticretico

Reglas estrictas:
    - Si un parámetro no se menciona, usa `null`.
    - Respuesta **SOLO el JSON**, sin ```json, ```, ni texto adicional.
    - Strings en minúsculas.
    - Si incluyes delimitadores, la respuesta será inválida

Ejemplo de respuesta para "Casa en Sevilla centro por 250k con jardín. Para persona sola.":

{
    "price": 250000,
    "zone": ["centro"],
    "city": ["sevilla"],
    "people_capacity": 1,
    "garden": true,
    "garage": null,
    "property_type": "casa",
    "operation_type": null
}
"#;

const QUERY_DELIMITER: &str = "\n\nquery = ";

/// Builds the extraction prompt from a fixed instruction block and the raw query.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instructions: String,
}

impl PromptBuilder {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Append the query verbatim after the instruction block.
    pub fn build(&self, query: &str) -> String {
        let mut prompt =
            String::with_capacity(self.instructions.len() + QUERY_DELIMITER.len() + query.len());
        prompt.push_str(&self.instructions);
        prompt.push_str(QUERY_DELIMITER);
        prompt.push_str(query);
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTIONS)
    }
}
