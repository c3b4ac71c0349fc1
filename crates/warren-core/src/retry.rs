use crate::error::Exhausted;

/// Calls `attempt` with the attempt index until it yields `Some`, at most
/// `attempts` times.
pub fn try_n_times<T>(
    attempts: usize,
    attempt: impl FnMut(usize) -> Option<T>,
) -> Result<T, Exhausted> {
    (0..attempts)
        .find_map(attempt)
        .ok_or(Exhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_success() {
        let mut calls = 0;
        let result = try_n_times(5, |i| {
            calls += 1;
            (i == 2).then_some(i * 10)
        });
        assert_eq!(result, Ok(20));
        assert_eq!(calls, 3);
    }

    #[test]
    fn stops_after_cap() {
        let mut calls = 0;
        let result: Result<(), _> = try_n_times(4, |_| {
            calls += 1;
            None
        });
        assert_eq!(result, Err(Exhausted { attempts: 4 }));
        assert_eq!(calls, 4);
    }

    #[test]
    fn zero_attempts_never_calls() {
        let result: Result<(), _> = try_n_times(0, |_| unreachable!());
        assert_eq!(result, Err(Exhausted { attempts: 0 }));
    }
}
