use crate::runtime::data_structures::stack::{STACK_CAPACITY, Stack};

/// Pop up to `count` values off of `source` and push them onto `destination`, stopping early if the
/// source runs dry.  Values land in reverse order.
pub fn move_values(source: &mut Stack, destination: &mut Stack, count: usize) {
    for _ in 0..count {
        match source.try_pop() {
            Ok(value) => destination.push(value),
            Err(_) => break,
        }
    }
}

/// Move everything on `source` over to `destination`.
pub fn move_all(source: &mut Stack, destination: &mut Stack) {
    let count = source.len();
    move_values(source, destination, count);
}

/// Rotate the top `m` values of `stack` by `n` positions, using `aux` as scratch space.  Only the
/// values parked on `aux` during a step are taken back off of it, so `aux` is left as it was found.
/// If `aux` has no room for `m - 1` more values a private scratch stack is used instead.
///
/// Each step takes the top value and sinks it below the next `m - 1` values, so with `1 2 3` on
/// the stack a rotation of the top three by one gives `3 1 2`.  A negative `n` rotates the other
/// way.  `m` is clamped to the depth of the stack.
pub fn roll(stack: &mut Stack, aux: &mut Stack, m: usize, n: i64) {
    let m = m.min(stack.len());

    if m < 2 {
        return;
    }

    let width = m as i64;
    // A full turn is the identity, so only the remainder needs to be walked.
    let n = if n < 0 {
        width - (n.unsigned_abs() % m as u64) as i64
    } else {
        n % width
    };

    if n == 0 || n == width {
        return;
    }

    if STACK_CAPACITY - aux.len() < m - 1 {
        rotate(stack, &mut Stack::new(), m, n as usize);
    } else {
        rotate(stack, aux, m, n as usize);
    }
}

/// Sink the top value below the next `m - 1` values, `n` times over.  `aux` must have room for
/// `m - 1` values.
fn rotate(stack: &mut Stack, aux: &mut Stack, m: usize, n: usize) {
    for _ in 0..n {
        let top = stack.pop();

        move_values(stack, aux, m - 1);
        stack.push(top);
        move_values(aux, stack, m - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(values: &[f64]) -> Stack {
        let mut stack = Stack::new();

        for value in values {
            stack.push(*value);
        }

        stack
    }

    fn rolled(values: &[f64], m: usize, n: i64) -> Vec<f64> {
        let mut stack = stack_of(values);
        let mut aux = Stack::new();

        roll(&mut stack, &mut aux, m, n);
        assert!(aux.is_empty());

        stack.as_slice().to_vec()
    }

    #[test]
    fn move_reverses_and_stops_when_empty() {
        let mut source = stack_of(&[1.0, 2.0, 3.0]);
        let mut destination = stack_of(&[9.0]);

        move_values(&mut source, &mut destination, 2);
        assert_eq!(source.as_slice(), &[1.0]);
        assert_eq!(destination.as_slice(), &[9.0, 3.0, 2.0]);

        move_values(&mut source, &mut destination, 10);
        assert!(source.is_empty());
        assert_eq!(destination.as_slice(), &[9.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn move_there_and_back_restores() {
        let mut source = stack_of(&[1.0, 2.0, 3.0, 4.0]);
        let mut other = Stack::new();

        move_values(&mut source, &mut other, 3);
        move_values(&mut other, &mut source, 3);

        assert_eq!(source.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(other.is_empty());
    }

    #[test]
    fn move_into_a_full_stack_drops_values() {
        let mut source = stack_of(&[1.0, 2.0]);
        let mut destination = Stack::new();

        for _ in 0..STACK_CAPACITY {
            destination.push(0.0);
        }

        move_values(&mut source, &mut destination, 1);

        assert_eq!(source.as_slice(), &[1.0]);
        assert_eq!(destination.len(), STACK_CAPACITY);
    }

    #[test]
    fn rotates_top_segment() {
        assert_eq!(rolled(&[1.0, 2.0, 3.0], 3, 1), vec![3.0, 1.0, 2.0]);
        assert_eq!(rolled(&[1.0, 2.0, 3.0], 3, 2), vec![2.0, 3.0, 1.0]);
        assert_eq!(rolled(&[0.0, 1.0, 2.0, 3.0], 3, 1), vec![0.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn negative_rotation_goes_the_other_way() {
        assert_eq!(rolled(&[1.0, 2.0, 3.0], 3, -1), vec![2.0, 3.0, 1.0]);
        assert_eq!(rolled(&[1.0, 2.0, 3.0], 3, -4), vec![2.0, 3.0, 1.0]);
        assert_eq!(rolled(&[1.0, 2.0, 3.0], 3, -3), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn identities() {
        let values = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(rolled(&values, 4, 0), values.to_vec());
        assert_eq!(rolled(&values, 4, 4), values.to_vec());
        assert_eq!(rolled(&values, 1, 3), values.to_vec());
        assert_eq!(rolled(&values, 0, 3), values.to_vec());
    }

    #[test]
    fn scratch_contents_survive() {
        let mut stack = stack_of(&[1.0, 2.0, 3.0]);
        let mut aux = stack_of(&[7.0, 8.0]);

        roll(&mut stack, &mut aux, 3, 1);

        assert_eq!(stack.as_slice(), &[3.0, 1.0, 2.0]);
        assert_eq!(aux.as_slice(), &[7.0, 8.0]);
    }

    #[test]
    fn nearly_full_scratch_loses_nothing() {
        let mut stack = stack_of(&[1.0, 2.0, 3.0]);
        let mut aux = Stack::new();

        for index in 0..STACK_CAPACITY - 1 {
            aux.push(1000.0 + index as f64);
        }

        let before = aux.as_slice().to_vec();

        roll(&mut stack, &mut aux, 3, 1);

        assert_eq!(stack.as_slice(), &[3.0, 1.0, 2.0]);
        assert_eq!(aux.as_slice(), before.as_slice());
    }

    #[test]
    fn depth_is_clamped() {
        assert_eq!(rolled(&[1.0, 2.0], 10, 1), vec![2.0, 1.0]);
    }

    #[test]
    fn rotation_is_invertible() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];

        for m in 2..=5usize {
            for n in -7i64..=7 {
                let mut stack = stack_of(&values);
                let mut aux = Stack::new();
                let inverse = (m as i64 - n).rem_euclid(m as i64);

                roll(&mut stack, &mut aux, m, n);
                roll(&mut stack, &mut aux, m, inverse);

                assert_eq!(stack.as_slice(), &values, "m = {}, n = {}", m, n);
            }
        }
    }
}
