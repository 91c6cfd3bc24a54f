/// Appends `value` in decimal to `buf`, left-padded with `'0'` to at least
/// `width` digits. A `width` of 1 or less (conventionally `-1`) means no
/// padding. Wider values are never truncated.
pub fn itoa(buf: &mut Vec<u8>, mut value: u64, width: i32) {
    let mut digits = [0u8; 20];
    let mut index = digits.len();
    let mut width = width;
    while value >= 10 || width > 1 {
        width -= 1;
        index -= 1;
        digits[index] = b'0' + (value % 10) as u8;
        value /= 10;
        if index == 0 {
            break;
        }
    }
    if index > 0 {
        index -= 1;
        digits[index] = b'0' + value as u8;
    }
    buf.extend_from_slice(&digits[index..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64, width: i32) -> String {
        let mut buf = Vec::new();
        itoa(&mut buf, value, width);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_two_digit_field_is_padded() {
        assert_eq!(encode(5, 2), "05");
        assert_eq!(encode(12, 2), "12");
    }

    #[test]
    fn test_zero_with_width_keeps_padding() {
        assert_eq!(encode(0, 4), "0000");
        assert_eq!(encode(0, 1), "0");
        assert_eq!(encode(0, -1), "0");
    }

    #[test]
    fn test_unpadded_multi_digit() {
        assert_eq!(encode(123, -1), "123");
        assert_eq!(encode(u64::MAX, -1), u64::MAX.to_string());
    }

    #[test]
    fn test_value_wider_than_width_is_not_truncated() {
        assert_eq!(encode(2024, 2), "2024");
        assert_eq!(encode(42, 6), "000042");
    }

    #[test]
    fn test_appends_to_existing_content() {
        let mut buf = b"line ".to_vec();
        itoa(&mut buf, 7, 3);
        assert_eq!(buf, b"line 007");
    }
}
