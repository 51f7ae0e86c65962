use std::collections::HashMap;

use crate::entities::{BucketId, Ledger};

/// One operand of a formula.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Term {
    Add(&'static str),
    Sub(&'static str),
    /// Adds the larger of two lines.
    AddMax(&'static str, &'static str),
}

#[derive(Debug)]
pub(crate) struct Formula {
    pub(crate) output: &'static str,
    pub(crate) terms: &'static [Term],
}

#[cfg(test)]
impl Term {
    pub(crate) fn inputs(&self) -> Vec<&'static str> {
        match *self {
            Term::Add(id) | Term::Sub(id) => vec![id],
            Term::AddMax(a, b) => vec![a, b],
        }
    }
}

use Term::{Add, AddMax, Sub};

const fn f(output: &'static str, terms: &'static [Term]) -> Formula {
    Formula { output, terms }
}

/// Formulario 210 formulas, in the order they must be evaluated. Later
/// formulas read outputs of earlier ones within the same pass.
pub(crate) const FORMULAS: &[Formula] = &[
    // Patrimonio.
    f("31", &[Add("29"), Sub("30")]),
    // Cédula general: rentas de trabajo.
    f("34", &[Add("32"), Sub("33")]),
    f("37", &[Add("35"), Add("36")]),
    f("40", &[Add("38"), Add("39")]),
    // TODO: 41, 53, 69 and 86 are entered as plain inputs; the form limits
    // them to a share of the net income of each schedule.
    f("42", &[Add("34"), Sub("41")]),
    // Cédula general: rentas de trabajo no laboral.
    f("46", &[Add("43"), Sub("44"), Sub("45")]),
    f("49", &[Add("47"), Add("48")]),
    f("52", &[Add("50"), Add("51")]),
    f("54", &[Add("43"), Sub("44"), Sub("45"), Sub("53")]),
    f("55", &[Add("44"), Add("45"), Sub("43")]),
    f("57", &[Add("54"), Sub("56")]),
    // Cédula general: rentas de capital.
    f("61", &[Add("58"), Sub("59"), Sub("60")]),
    f("65", &[Add("63"), Add("64")]),
    f("68", &[Add("66"), Add("67")]),
    f("70", &[Add("58"), Add("62"), Sub("59"), Sub("60"), Sub("69")]),
    f("71", &[Add("59"), Add("60"), Sub("58"), Sub("62")]),
    f("73", &[Add("70"), Sub("72")]),
    // Cédula general: rentas no laborales.
    f("78", &[Add("74"), Sub("75"), Sub("76"), Sub("77")]),
    f("82", &[Add("80"), Add("81")]),
    f("85", &[Add("83"), Add("84")]),
    f("87", &[Add("74"), Add("79"), Sub("75"), Sub("76"), Sub("77"), Sub("86")]),
    f("88", &[Add("75"), Add("76"), Add("77"), Sub("74"), Sub("79")]),
    f("90", &[Add("87"), Sub("89")]),
    // Resumen cédula general.
    f(
        "91",
        &[
            Add("41"),
            Add("42"),
            Add("53"),
            Add("57"),
            Add("69"),
            Add("73"),
            Add("86"),
            Add("90"),
        ],
    ),
    f(
        "92",
        &[Add("28"), Add("41"), Add("53"), Add("69"), Add("86"), Add("139")],
    ),
    f("93", &[Add("91"), Sub("92")]),
    f("97", &[Add("93"), Add("96"), Sub("94"), Sub("95")]),
    // Cédula de pensiones.
    f("101", &[Add("99"), Sub("100")]),
    f("103", &[Add("101"), Sub("102")]),
    // Cédula de dividendos y participaciones.
    f("106", &[Add("104"), Sub("105")]),
    f(
        "111",
        &[AddMax("97", "98"), Add("103"), Add("107"), Add("108"), Sub("118")],
    ),
    // Ganancias ocasionales.
    f("115", &[Add("112"), Sub("113"), Sub("114")]),
    // Liquidación privada.
    f("121", &[Add("116"), Add("117"), Add("118"), Add("119"), Add("120")]),
    // Descuentos tributarios.
    f("125", &[Add("122"), Add("123"), Add("124")]),
    // Liquidación final.
    f("126", &[Add("121"), Sub("125")]),
    f("129", &[Add("126"), Add("127"), Sub("128")]),
    f("134", &[Add("129"), Add("133"), Sub("130"), Sub("131"), Sub("132")]),
    f(
        "136",
        &[Add("129"), Add("133"), Add("135"), Sub("130"), Sub("131"), Sub("132")],
    ),
    f(
        "137",
        &[Add("130"), Add("131"), Add("132"), Sub("129"), Sub("133"), Sub("135")],
    ),
];

impl Formula {
    fn evaluate(&self, values: &HashMap<&str, f64>) -> f64 {
        let v = |id: &str| values.get(id).copied().unwrap_or(0.0);
        let computed = self.terms.iter().fold(0.0, |total, term| match *term {
            Term::Add(id) => total + v(id),
            Term::Sub(id) => total - v(id),
            Term::AddMax(a, b) => total + v(a).max(v(b)),
        });
        // Derived lines are never reported negative; losses have their own
        // lines.
        if computed > 0.0 {
            computed
        } else {
            0.0
        }
    }
}

/// Recomputes every calculated bucket of a ledger in a single ordered pass.
pub(crate) struct FormulaEvaluator<'a> {
    ledger: &'a Ledger,
}

impl<'a> FormulaEvaluator<'a> {
    pub(crate) fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub(crate) fn process(self) -> Ledger {
        let mut values: HashMap<&str, f64> = self
            .ledger
            .buckets()
            .iter()
            .map(|b| (b.id().as_str(), b.value()))
            .collect();
        let mut result = self.ledger.clone();

        for formula in FORMULAS {
            let output = BucketId(formula.output.to_string());
            if !self.ledger.is_calculated(&output) {
                continue;
            }
            let value = formula.evaluate(&values);
            values.insert(formula.output, value);
            result.set_calculated_value(&output, value);
        }

        result
    }
}
