use std::num;

quick_error! {
    #[derive(Debug)]
    pub enum DecodeError {
        UnexpectedSentenceType {
            description("Sentence type has wrong format")
            display("Encountered unexpected sentence type")
        }
        FieldCount(found: usize) {
            description("Wrong number of fields")
            display("Encountered sentence with {} fields", found)
        }
        NoFix {
            description("Navigation receiver warning")
            display("Status field reports no valid fix")
        }
        Coordinate(err: CoordinateParseError) {
            from()
            description("Coordinate parsing error")
            display("Could not parse field as coordinate: {}", err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CoordinateParseError {
        Degrees(err: num::ParseFloatError) {
            description("Invalid degrees")
            display("Could not parse degrees: {}", err)
            cause(err)
        }
        Minutes(err: num::ParseFloatError) {
            description("Invalid minutes")
            display("Could not parse whole minutes: {}", err)
            cause(err)
        }
        MinuteFraction(err: num::ParseFloatError) {
            description("Invalid minute fraction")
            display("Could not parse fractional minutes: {}", err)
            cause(err)
        }
    }
}
