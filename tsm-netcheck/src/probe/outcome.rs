/// Result of one probe for one cycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Success, // the utility exited with 0
    Fail, // the utility exited with its failure code
    Unknown, // the utility exited with some other code
    Pending, // the process was still running at the end of the cycle
}


impl Outcome {
    /// Maps an exit code to an outcome. `failure_code` is the code the probe
    /// utility uses for "no reply" / "not resolved".
    pub fn classify(exit_code: i32, failure_code: i32) -> Outcome {
        if exit_code == 0 {
            return Outcome::Success;
        }

        if exit_code == failure_code {
            return Outcome::Fail;
        }

        return Outcome::Unknown;
    }

    pub fn symbol(&self) -> char {
        match self {
            Outcome::Success => '*',
            Outcome::Fail => 'X',
            Outcome::Unknown => '?',
            Outcome::Pending => '.',
        }
    }
}
