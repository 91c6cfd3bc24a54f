use std::{
    borrow::Cow,
    fmt::{self, Display, Write},
};

/// A value that can be handed to the level functions.
///
/// String operands glue to their neighbours; a space is only inserted between
/// two adjacent operands when neither of them is a string.
pub trait Operand {
    fn is_string(&self) -> bool;
    fn write_to(&self, out: &mut String);
}

impl Operand for str {
    fn is_string(&self) -> bool {
        true
    }
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Operand for String {
    fn is_string(&self) -> bool {
        true
    }
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Operand for Cow<'_, str> {
    fn is_string(&self) -> bool {
        true
    }
    fn write_to(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Operand for fmt::Arguments<'_> {
    fn is_string(&self) -> bool {
        true
    }
    fn write_to(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

impl<T: Operand + ?Sized> Operand for &T {
    fn is_string(&self) -> bool {
        (**self).is_string()
    }
    fn write_to(&self, out: &mut String) {
        (**self).write_to(out)
    }
}

macro_rules! display_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                fn is_string(&self) -> bool {
                    false
                }
                fn write_to(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

display_operand!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// Wraps any `Display` value as a non-string operand.
pub struct Shown<T>(pub T);

impl<T: Display> Operand for Shown<T> {
    fn is_string(&self) -> bool {
        false
    }
    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

/// Concatenates operands with the print-all spacing rule.
pub fn sprint(args: &[&dyn Operand]) -> String {
    let mut out = String::new();
    let mut previous_is_string = true;
    for (i, arg) in args.iter().enumerate() {
        let is_string = arg.is_string();
        if i > 0 && !is_string && !previous_is_string {
            out.push(' ');
        }
        arg.write_to(&mut out);
        previous_is_string = is_string;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_are_not_spaced() {
        assert_eq!(sprint(&[&"a", &"b", &String::from("c")]), "abc");
    }

    #[test]
    fn test_non_strings_are_spaced() {
        assert_eq!(sprint(&[&1, &2.5, &true]), "1 2.5 true");
    }

    #[test]
    fn test_mixed_operands() {
        assert_eq!(sprint(&[&"a", &1, &2, &"b", &3]), "a1 2b3");
        assert_eq!(sprint(&[&"count:", &Shown(std::path::Path::new("x").display())]), "count:x");
        assert_eq!(sprint(&[&'x', &Shown("y")]), "x y");
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(sprint(&[]), "");
        assert_eq!(sprint(&[&42u64]), "42");
    }

    #[test]
    fn test_format_args_is_a_string_operand() {
        let n = 3;
        assert_eq!(sprint(&[&format_args!("n={n}"), &4]), "n=34");
    }
}
