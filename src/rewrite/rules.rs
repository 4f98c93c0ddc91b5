use regex::Regex;

/// The console call shapes that have a structured-logger equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `console.error('msg', error);`
    ErrorWithException,
    /// `console.error('msg');`
    Error,
    /// `console.log('msg');`
    Info,
    /// `console.warn('msg');`
    Warn,
}

impl CallShape {
    /// Most specific first: `Error` would otherwise never see the exception form.
    pub const ORDER: [CallShape; 4] = [
        CallShape::ErrorWithException,
        CallShape::Error,
        CallShape::Info,
        CallShape::Warn,
    ];

    fn console_method(self) -> &'static str {
        match self {
            CallShape::ErrorWithException | CallShape::Error => "error",
            CallShape::Info => "log",
            CallShape::Warn => "warn",
        }
    }

    fn logger_method(self) -> &'static str {
        match self {
            CallShape::ErrorWithException | CallShape::Error => "error",
            CallShape::Info => "info",
            CallShape::Warn => "warn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub const ORDER: [Quote; 2] = [Quote::Single, Quote::Double];

    fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

const EXCEPTION_DETAILS: &str = "{ error: error.message, stack: error.stack }";

#[derive(Debug, Clone)]
pub struct Rule {
    pub shape: CallShape,
    pub quote: Quote,
    pattern: Regex,
    template: String,
}

impl Rule {
    pub fn new(shape: CallShape, quote: Quote, binding: &str) -> Self {
        let q = quote.as_char();
        let tail = match shape {
            CallShape::ErrorWithException => r",\s*error",
            _ => "",
        };
        let pattern = format!(
            r"console\.{method}\({q}([^{q}]+){q}{tail}\);",
            method = shape.console_method(),
        );

        let details = match shape {
            CallShape::ErrorWithException => format!(", {}", EXCEPTION_DETAILS),
            _ => String::new(),
        };
        // `$` is the capture-group sigil in templates
        let template = format!(
            "{binding}.{method}({q}${{1}}{q}{details});",
            binding = binding.replace('$', "$$"),
            method = shape.logger_method(),
        );

        Self {
            shape,
            quote,
            pattern: Regex::new(&pattern).unwrap(),
            template,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace every non-overlapping match, returning the new text and hit count.
    fn apply(&self, text: &str) -> (String, usize) {
        let hits = self.pattern.find_iter(text).count();
        if hits == 0 {
            return (text.to_string(), 0);
        }
        let out = self.pattern.replace_all(text, self.template.as_str());
        (out.into_owned(), hits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub replacements: usize,
}

/// Ordered substitution rules. Order is part of the contract.
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<Rule>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new("logger")
    }
}

impl Rewriter {
    pub fn new(binding: &str) -> Self {
        let rules = CallShape::ORDER
            .into_iter()
            .flat_map(|shape| {
                Quote::ORDER
                    .into_iter()
                    .map(move |q| Rule::new(shape, q, binding))
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn apply(&self, text: &str) -> Rewrite {
        let mut current = text.to_string();
        let mut replacements = 0usize;
        for rule in &self.rules {
            let (next, hits) = rule.apply(&current);
            if hits > 0 {
                tracing::trace!(shape = ?rule.shape, quote = ?rule.quote, hits, "rule applied");
            }
            current = next;
            replacements += hits;
        }
        Rewrite {
            text: current,
            replacements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str) -> Rewrite {
        Rewriter::default().apply(text)
    }

    #[test]
    fn rules_follow_shape_then_quote_order() {
        let order: Vec<_> = Rewriter::default()
            .rules()
            .iter()
            .map(|r| (r.shape, r.quote))
            .collect();
        assert_eq!(
            order,
            vec![
                (CallShape::ErrorWithException, Quote::Single),
                (CallShape::ErrorWithException, Quote::Double),
                (CallShape::Error, Quote::Single),
                (CallShape::Error, Quote::Double),
                (CallShape::Info, Quote::Single),
                (CallShape::Info, Quote::Double),
                (CallShape::Warn, Quote::Single),
                (CallShape::Warn, Quote::Double),
            ]
        );
    }

    #[test]
    fn error_with_exception_object() {
        let out = rewrite("  } catch (error) {\n    console.error('Failed to load', error);\n  }\n");
        assert_eq!(out.replacements, 1);
        assert_eq!(
            out.text,
            "  } catch (error) {\n    logger.error('Failed to load', { error: error.message, stack: error.stack });\n  }\n"
        );
        assert!(!out.text.contains("console.error"));

        let out = rewrite("console.error(\"Boom\",error);");
        assert_eq!(
            out.text,
            "logger.error(\"Boom\", { error: error.message, stack: error.stack });"
        );
    }

    #[test]
    fn message_only_shapes() {
        let out = rewrite(
            "console.log(\"hello world\");\nconsole.error('bad');\nconsole.warn(\"careful\");\nconsole.log('a'); console.log('b');\n",
        );
        assert_eq!(out.replacements, 5);
        assert_eq!(
            out.text,
            "logger.info(\"hello world\");\nlogger.error('bad');\nlogger.warn(\"careful\");\nlogger.info('a'); logger.info('b');\n"
        );
    }

    #[test]
    fn unsupported_shapes_pass_through() {
        let text = concat!(
            "console.log('count', n);\n",
            "console.log(`value ${v}`);\n",
            "console.log(message);\n",
            "console.log('no semicolon')\n",
            "console.error('oops', err);\n",
            "console.log(\n  'multi'\n);\n",
            "console.info('other');\n",
            "console.log('');\n",
        );
        let out = rewrite(text);
        assert_eq!(out.replacements, 0);
        assert_eq!(out.text, text);
    }

    #[test]
    fn escaped_quote_is_not_rewritten() {
        let text = "console.log('it\\'s');\n";
        assert_eq!(rewrite(text).text, text);
    }

    #[test]
    fn mixed_quote_inside_message_survives() {
        let out = rewrite("console.warn(\"don't\");\nconsole.log('say \"hi\"');\n");
        assert_eq!(
            out.text,
            "logger.warn(\"don't\");\nlogger.info('say \"hi\"');\n"
        );
    }

    #[test]
    fn rewriting_twice_changes_nothing() {
        let once = rewrite("console.error('x', error);\nconsole.log(\"y\");\n");
        let twice = rewrite(&once.text);
        assert_eq!(twice.replacements, 0);
        assert_eq!(twice.text, once.text);
    }

    #[test]
    fn message_with_dollar_is_copied_verbatim() {
        let out = rewrite("console.log('costs $5 or $1');\n");
        assert_eq!(out.text, "logger.info('costs $5 or $1');\n");
    }

    #[test]
    fn custom_binding() {
        let out = Rewriter::new("$log").apply("console.warn('w');");
        assert_eq!(out.text, "$log.warn('w');");
    }
}
