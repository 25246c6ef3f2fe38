use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::AppError;

// ---
// Normalização de nomes (loja, categoria, remédio, fornecedor...)
// ---

/// Minúsculas, espaços internos colapsados e pontas aparadas, sem regras de
/// tamanho. Usado para campos livres como a dosagem ("500 mg").
pub fn normalize_loose(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normaliza um nome e valida as regras de formato.
///
/// O resultado é sempre minúsculo, com espaços colapsados e aparado. Rejeita
/// nomes que começam com caractere especial, com menos de 3 ou mais de 100
/// caracteres. Normalizar um nome já normalizado devolve a mesma string.
pub fn normalize_name(raw: &str, label: &str) -> Result<String, AppError> {
    let processed = normalize_loose(raw);

    if processed.chars().next().is_some_and(|c| !is_word_char(c)) {
        return Err(AppError::Validation(format!(
            "{label} name cannot start with a special character"
        )));
    }
    if processed.chars().count() < 3 {
        return Err(AppError::Validation(format!(
            "{label} name must be at least 3 characters long"
        )));
    }
    if processed.chars().count() > 100 {
        return Err(AppError::Validation(format!(
            "{label} name can't be more than 100 characters long"
        )));
    }

    Ok(processed)
}

// Equivalente ao \w de regex: letras, dígitos e sublinhado.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ---
// Valores monetários (aceitam string ou número no JSON)
// ---

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        // Passa pelo texto do número para não herdar imprecisão binária de f64.
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// Interpreta um preço obrigatório: precisa ser numérico e estritamente
/// positivo.
pub fn parse_positive_money(value: &Value, label: &str) -> Result<Decimal, AppError> {
    match parse_decimal(value) {
        Some(d) if d > Decimal::ZERO => Ok(d),
        _ => Err(AppError::Validation(format!(
            "{label} must be a positive number"
        ))),
    }
}

/// Interpreta um valor opcional (desconto, imposto): ausente vira zero,
/// presente precisa ser numérico e não negativo.
pub fn parse_non_negative_money(value: Option<&Value>, label: &str) -> Result<Decimal, AppError> {
    let Some(value) = value else {
        return Ok(Decimal::ZERO);
    };
    if value.is_null() {
        return Ok(Decimal::ZERO);
    }
    match parse_decimal(value) {
        Some(d) if d >= Decimal::ZERO => Ok(d),
        _ => Err(AppError::Validation(format!(
            "{label} must be a positive number or zero"
        ))),
    }
}

// ---
// Presença de campos (validator)
// ---

/// Converte os erros do `validator` na primeira violação segundo a ordem de
/// declaração dos campos — a API responde uma mensagem por vez, na ordem em
/// que o payload é conferido.
pub fn first_violation(errors: &validator::ValidationErrors, order: &[&str]) -> AppError {
    let by_field = errors.field_errors();
    for field in order {
        if let Some(field_errors) = by_field.get(*field) {
            if let Some(message) = field_errors.iter().find_map(|e| e.message.as_ref()) {
                return AppError::Validation(message.to_string());
            }
        }
    }
    AppError::Validation("Invalid request body".to_string())
}

// ---
// Identificadores
// ---

/// Valida a forma sintática de um id vindo do cliente antes de usá-lo como
/// chave no banco.
pub fn parse_object_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_collapses_and_trims() {
        let got = normalize_name("  Sunrise   PHARMACY  ", "Shop").unwrap();
        assert_eq!(got, "sunrise pharmacy");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_name("Sunrise   Pharmacy", "Shop").unwrap();
        let twice = normalize_name(&once, "Shop").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rejects_leading_special_character() {
        let err = normalize_name("@farma", "Shop").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shop name cannot start with a special character"
        );
    }

    #[test]
    fn normalize_rejects_short_names() {
        let err = normalize_name("ab", "Category").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Category name must be at least 3 characters long"
        );
    }

    #[test]
    fn normalize_rejects_long_names() {
        let long = "a".repeat(101);
        let err = normalize_name(&long, "Shop").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shop name can't be more than 100 characters long"
        );
    }

    #[test]
    fn underscore_counts_as_word_character() {
        assert_eq!(normalize_name("_interno", "Shop").unwrap(), "_interno");
    }

    #[test]
    fn positive_money_accepts_string_and_number() {
        let from_string = parse_positive_money(&Value::from("120.50"), "Total price").unwrap();
        assert_eq!(from_string, Decimal::from_str("120.50").unwrap());

        let from_number = parse_positive_money(&Value::from(99.9), "Total price").unwrap();
        assert_eq!(from_number, Decimal::from_str("99.9").unwrap());
    }

    #[test]
    fn positive_money_rejects_zero_negative_and_garbage() {
        for bad in [Value::from("0"), Value::from("-5"), Value::from("abc"), Value::Bool(true)] {
            let err = parse_positive_money(&bad, "Total price").unwrap_err();
            assert_eq!(err.to_string(), "Total price must be a positive number");
        }
    }

    #[test]
    fn non_negative_money_defaults_to_zero() {
        assert_eq!(
            parse_non_negative_money(None, "Total discount").unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            parse_non_negative_money(Some(&Value::Null), "Total discount").unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn non_negative_money_accepts_zero_but_not_negative() {
        assert_eq!(
            parse_non_negative_money(Some(&Value::from("0")), "Total tax").unwrap(),
            Decimal::ZERO
        );
        let err = parse_non_negative_money(Some(&Value::from("-1")), "Total tax").unwrap_err();
        assert_eq!(err.to_string(), "Total tax must be a positive number or zero");
    }

    #[test]
    fn first_violation_follows_declared_field_order() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(required(message = "Company/supplier name is required"))]
            company_name: Option<String>,
            #[validate(required(message = "Shop name is required"))]
            shop_name: Option<String>,
        }

        let payload = Payload {
            company_name: None,
            shop_name: None,
        };
        let errors = payload.validate().unwrap_err();
        let err = first_violation(&errors, &["company_name", "shop_name"]);
        assert_eq!(err.to_string(), "Company/supplier name is required");
    }

    #[test]
    fn object_id_requires_uuid_syntax() {
        assert!(parse_object_id("6889f3a2c3b4d5e6f7a8b9c0").is_err());
        assert!(parse_object_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    }
}
