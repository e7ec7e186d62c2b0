/// Bundled example puzzle: six people, six seats, six constraints.
pub const SAMPLE_PUZZLE: &str = "Alice, Bob, Carol, David, Emma, and Frank sit in 6 seats.
1. Alice is not at either end.
2. Bob sits immediately to the left of Carol.
3. David sits somewhere to the right of Alice.
4. Emma is not next to Bob.
5. Frank is not at seat 1 or seat 6.
6. Carol is not next to Frank.";
