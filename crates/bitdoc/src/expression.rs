//! C-style extraction expressions for compiled encodings.

use crate::{
    config::Config,
    encoding::{CompiledField, Encoding},
};

/// Span terms of `field` joined with ` | `.
pub fn expression(field: &CompiledField, source_name: &str) -> String {
    field
        .spans
        .iter()
        .map(|span| span.term(source_name))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `<name> = <expression> /* <width> */`
pub fn assignment(name: &str, field: &CompiledField, source_name: &str) -> String {
    format!(
        "{name} = {} /* {} */",
        expression(field, source_name),
        field.width
    )
}

/// One assignment line per field, in declaration order, each ending with `\n`.
pub fn render(encoding: &Encoding, config: &Config) -> String {
    let mut out = String::new();

    for (name, field) in &encoding.fields {
        out.push_str(&assignment(name, field, &config.source_name));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RV32I: &str = "
opcode
6 6-0

rd
11 4-0

rs1
19 4-0

s_imm
31 11-5
11 4-0

u_imm
31 19-0
";

    #[test]
    fn test_rs1() {
        let encoding: Encoding = "rs1\n19 4-0\n".parse().unwrap();
        assert_eq!(
            render(&encoding, &Config::default()),
            "rs1 = (input >> 15) & 0x0001f /* 5 */\n"
        );
    }

    #[test]
    fn test_multi_span_field() {
        let encoding: Encoding = "s_imm\n31 11-5\n11 4-0\n".parse().unwrap();
        let field = encoding.get("s_imm").unwrap();
        assert_eq!(
            assignment("s_imm", field, "input"),
            "s_imm = (input >> 20) & 0x00fe0 | (input >> 7) & 0x0001f /* 12 */"
        );
    }

    #[test]
    fn test_render_in_declaration_order() {
        let encoding: Encoding = RV32I.parse().unwrap();
        let mut config = Config::default();
        config.set_source_name("insn");

        assert_eq!(
            render(&encoding, &config),
            "opcode = insn & 0x0007f /* 7 */\n\
             rd = (insn >> 7) & 0x0001f /* 5 */\n\
             rs1 = (insn >> 15) & 0x0001f /* 5 */\n\
             s_imm = (insn >> 20) & 0x00fe0 | (insn >> 7) & 0x0001f /* 12 */\n\
             u_imm = (insn >> 12) & 0x0fffff /* 20 */\n"
        );
    }

    #[test]
    fn test_left_shift_term() {
        let encoding: Encoding = "b_imm\n31 12 10-5\n11 4-1 11\n".parse().unwrap();
        assert_eq!(
            expression(encoding.get("b_imm").unwrap(), "input"),
            "(input >> 19) & 0x01000 | (input >> 20) & 0x007e0 | (input >> 7) & 0x0001e | (input << 4) & 0x00800"
        );
    }
}
