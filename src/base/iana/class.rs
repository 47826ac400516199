//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. That is, each class has its own separate
    /// record tree starting at the root. However, in practice, only the IN
    /// class is really relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY. For record data
    /// registration, ANY doubles as the wildcard class: an implementation
    /// registered for ANY applies to every class.
    ///
    /// See [RFC 1034] for the introduction of classes, section 3.2 of
    /// [RFC 6895] for a discussion of the current state of affairs, and
    /// the [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [RFC 6895]: https://tools.ietf.org/html/rfc6895
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Reserved.
    (RESERVED0 => 0, "RESERVED0")

    /// Internet (IN).
    ///
    /// This class is defined in RFC 1035 and really the only one relevant
    /// at all.
    (IN => 1, "IN")

    /// Chaosnet (CH).
    ///
    /// A network protocol developed at MIT in the 1970s. Reused by BIND for
    /// built-in server information zones.
    (CH => 3, "CH")

    /// Hesiod (HS).
    ///
    /// A system information protocol part of MIT's Project Athena.
    (HS => 4, "HS")

    /// Query class None.
    ///
    /// Defined in RFC 2136, this class is used in UPDATE queries to
    /// require that an RRset does not exist prior to the update.
    (NONE => 0xFE, "NONE")

    /// Query class ANY.
    ///
    /// This class can be used in a query to indicate that records for the
    /// given name from any class are requested.
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Class;
    use core::str::FromStr;

    #[test]
    fn from_str_and_display() {
        assert_eq!(Class::from_str("in"), Ok(Class::IN));
        assert_eq!(Class::from_str("ANY"), Ok(Class::ANY));
        assert_eq!(Class::from_str("CLASS3"), Ok(Class::CH));
        assert_eq!(Class::from_str("class77"), Ok(Class::from_int(77)));
        assert!(Class::from_str("CLASS").is_err());
        assert!(Class::from_str("CLASSx").is_err());
        assert!(Class::from_str("CLASS65536").is_err());
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::from_int(77).to_string(), "CLASS77");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(&Class::IN.readable(), &[Token::Str("IN")]);
        assert_tokens(&Class(5).readable(), &[Token::Str("CLASS5")]);
        assert_tokens(&Class::IN.compact(), &[Token::U16(1)]);
        assert_tokens(&Class(5).compact(), &[Token::U16(5)]);
    }
}
