//! Утилиты форматирования чисел для карточек и таблиц

use contracts::kpi::ValueFormat;

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством
/// знаков после запятой
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    };

    let mut parts = formatted.splitn(2, '.');
    let integer_part = parts.next().unwrap_or_default();
    let decimal_part = parts.next();

    // Пробел каждые 3 цифры с конца целой части
    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(' ');
        }
        result.push(c);
    }
    let formatted_integer: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Денежное значение: 2 знака и разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Format a value according to its KPI display format.
pub fn format_value(value: f64, format: &ValueFormat) -> String {
    match format {
        ValueFormat::Money { currency } => format!("{} {}", format_money(value), currency),
        ValueFormat::Number { decimals } => format_number_with_decimals(value, *decimals),
        ValueFormat::Percent { decimals } => {
            format!("{}%", format_number_with_decimals(value, *decimals))
        }
        ValueFormat::Integer => format_number_int(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.89), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1 234.567");
    }

    #[test]
    fn test_format_value_by_kind() {
        assert_eq!(
            format_value(
                1234.5,
                &ValueFormat::Money {
                    currency: "₽".to_string()
                }
            ),
            "1 234.50 ₽"
        );
        assert_eq!(format_value(12.345, &ValueFormat::Percent { decimals: 1 }), "12.3%");
        assert_eq!(format_value(1234567.0, &ValueFormat::Integer), "1 234 567");
    }
}
