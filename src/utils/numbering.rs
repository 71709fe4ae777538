//! 业务编号生成规则

use chrono::{Datelike, NaiveDate};

use super::random_code::generate_code;

/// 学号：`<专业代码>/<序号四位>/<入学年份>`
pub fn student_number(program_code: &str, sequence: u64, admission: NaiveDate) -> String {
    format!(
        "{}/{:04}/{}",
        program_code.to_uppercase(),
        sequence,
        admission.year()
    )
}

/// 学号中年份部分的匹配模式，用于查找同专业同年份已有学号
pub fn student_number_year_suffix(admission: NaiveDate) -> String {
    format!("/{}", admission.year())
}

/// 工号：`LEC/<序号四位>`
pub fn staff_number(sequence: u64) -> String {
    format!("{STAFF_NUMBER_PREFIX}{sequence:04}")
}

/// 账单号：`INV-<年月>-<序号五位>`
pub fn invoice_number(issued_on: NaiveDate, sequence: u64) -> String {
    format!("INV-{}-{:05}", issued_on.format("%Y%m"), sequence)
}

/// 账单号中年月前缀，用于查找当月已有账单号
pub fn invoice_number_prefix(issued_on: NaiveDate) -> String {
    format!("INV-{}-", issued_on.format("%Y%m"))
}

pub const STAFF_NUMBER_PREFIX: &str = "LEC/";

pub fn student_sequence(number: &str) -> Option<u64> {
    number.split('/').nth(1)?.parse().ok()
}

pub fn staff_sequence(number: &str) -> Option<u64> {
    number.strip_prefix(STAFF_NUMBER_PREFIX)?.parse().ok()
}

pub fn invoice_sequence(number: &str) -> Option<u64> {
    number.rsplit('-').next()?.parse().ok()
}

/// 已有编号中的最大序号加一
///
/// 删除记录后序号不回退，无法解析的编号（手工录入）忽略。
pub fn next_sequence<I, S>(numbers: I, sequence_of: fn(&str) -> Option<u64>) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    numbers
        .into_iter()
        .filter_map(|number| sequence_of(number.as_ref()))
        .max()
        .unwrap_or(0)
        + 1
}

/// 收据号：`RCPT-` 加 8 位随机字母数字
pub fn receipt_number() -> String {
    format!("RCPT-{}", generate_code(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_student_number() {
        assert_eq!(student_number("dit", 7, date(2025, 9, 1)), "DIT/0007/2025");
        assert_eq!(student_number_year_suffix(date(2025, 9, 1)), "/2025");
    }

    #[test]
    fn test_staff_and_invoice_numbers() {
        assert_eq!(staff_number(12), "LEC/0012");
        assert_eq!(invoice_number(date(2025, 3, 14), 42), "INV-202503-00042");
        assert_eq!(invoice_number_prefix(date(2025, 3, 14)), "INV-202503-");
    }

    #[test]
    fn test_next_sequence_follows_highest_number() {
        // 中间的编号被删除后仍从最大值往后排
        let numbers = ["DIT/0002/2025", "DIT/0003/2025"];
        assert_eq!(next_sequence(numbers, student_sequence), 4);
        assert_eq!(next_sequence(Vec::<String>::new(), student_sequence), 1);

        let staff = ["LEC/0001", "LEC/0010", "EXT-7"];
        assert_eq!(next_sequence(staff, staff_sequence), 11);

        let invoices = ["INV-202503-00009", "INV-202503-00002"];
        assert_eq!(next_sequence(invoices, invoice_sequence), 10);
    }

    #[test]
    fn test_receipt_number_shape() {
        let receipt = receipt_number();
        assert!(receipt.starts_with("RCPT-"));
        assert_eq!(receipt.len(), 13);
    }
}
