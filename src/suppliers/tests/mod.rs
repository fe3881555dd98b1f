#![cfg(test)]

mod idlix_test;
